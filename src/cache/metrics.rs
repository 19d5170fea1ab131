//! Metrics Sink Module
//!
//! Receives cache events for publishing to an external collection system.
//! Each engine is handed its own sink at construction; there is no
//! process-wide registry.

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use metrics::{counter, describe_counter, describe_gauge, gauge, Counter, Gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

// == Metrics Sink ==
/// Observer of cache events. All methods default to no-ops.
///
/// Called while the engine lock is held, so implementations must be cheap
/// and must not call back into the engine.
pub trait MetricsSink: Send + Sync + Debug {
    fn record_hit(&self) {}
    fn record_miss(&self) {}
    /// An expired entry was found and purged. Reported in addition to the miss.
    fn record_expired(&self) {}
    fn record_eviction(&self) {}
    /// Current number of entries.
    fn set_size(&self, _size: usize) {}
}

// == Noop Sink ==
/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MetricsSink for NoopSink {}

// == Counter Sink ==
/// Sink backed by atomic counters and a size gauge.
#[derive(Debug, Default)]
pub struct CounterSink {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    evictions: AtomicU64,
    size: AtomicUsize,
}

impl CounterSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn expired(&self) -> u64 {
        self.expired.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }
}

impl MetricsSink for CounterSink {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    fn set_size(&self, size: usize) {
        self.size.store(size, Ordering::Relaxed);
    }
}

// == Prometheus Sink ==
/// Sink publishing to a Prometheus recorder owned by this sink.
///
/// The recorder is never installed globally, so several nodes in one
/// process keep separate counters.
pub struct PrometheusSink {
    handle: PrometheusHandle,
    hits: Counter,
    misses: Counter,
    expired: Counter,
    evictions: Counter,
    size: Gauge,
}

impl PrometheusSink {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            describe_counter!("cache_hits_total", "Total cache hits");
            describe_counter!("cache_misses_total", "Total cache misses");
            describe_counter!("cache_ttl_expired_total", "Total TTL expired");
            describe_counter!("cache_evictions_total", "Total LRU evictions");
            describe_gauge!("cache_size", "Current cache size");

            Self {
                handle,
                hits: counter!("cache_hits_total"),
                misses: counter!("cache_misses_total"),
                expired: counter!("cache_ttl_expired_total"),
                evictions: counter!("cache_evictions_total"),
                size: gauge!("cache_size"),
            }
        })
    }

    /// Renders every metric in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for PrometheusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for PrometheusSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrometheusSink").finish_non_exhaustive()
    }
}

impl MetricsSink for PrometheusSink {
    fn record_hit(&self) {
        self.hits.increment(1);
    }

    fn record_miss(&self) {
        self.misses.increment(1);
    }

    fn record_expired(&self) {
        self.expired.increment(1);
    }

    fn record_eviction(&self) {
        self.evictions.increment(1);
    }

    fn set_size(&self, size: usize) {
        self.size.set(size as f64);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_sink_records_events() {
        let sink = CounterSink::new();
        sink.record_hit();
        sink.record_hit();
        sink.record_miss();
        sink.record_expired();
        sink.record_eviction();
        sink.set_size(7);

        assert_eq!(sink.hits(), 2);
        assert_eq!(sink.misses(), 1);
        assert_eq!(sink.expired(), 1);
        assert_eq!(sink.evictions(), 1);
        assert_eq!(sink.size(), 7);
    }

    #[test]
    fn test_sinks_are_independent() {
        let a = CounterSink::new();
        let b = CounterSink::new();
        a.record_hit();

        assert_eq!(a.hits(), 1);
        assert_eq!(b.hits(), 0);
    }

    /// Value of the sample line for `name`, if rendered.
    fn sample(text: &str, name: &str) -> Option<f64> {
        text.lines()
            .filter(|line| !line.starts_with('#'))
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(' '))
            .and_then(|value| value.trim().parse().ok())
    }

    #[test]
    fn test_prometheus_sink_renders_events() {
        let sink = PrometheusSink::new();
        sink.record_hit();
        sink.record_miss();
        sink.record_miss();
        sink.record_expired();
        sink.set_size(3);

        let text = sink.render();
        assert!(text.contains("# TYPE cache_hits_total counter"));
        assert!(text.contains("# TYPE cache_size gauge"));
        assert_eq!(sample(&text, "cache_hits_total"), Some(1.0));
        assert_eq!(sample(&text, "cache_misses_total"), Some(2.0));
        assert_eq!(sample(&text, "cache_ttl_expired_total"), Some(1.0));
        assert_eq!(sample(&text, "cache_size"), Some(3.0));
    }

    #[test]
    fn test_prometheus_sinks_are_independent() {
        let a = PrometheusSink::new();
        let b = PrometheusSink::new();
        a.record_eviction();
        a.record_eviction();
        b.record_eviction();

        assert_eq!(sample(&a.render(), "cache_evictions_total"), Some(2.0));
        assert_eq!(sample(&b.render(), "cache_evictions_total"), Some(1.0));
    }
}
