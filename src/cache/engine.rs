//! Cache Engine Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use crate::cache::{
    CacheEntry, CacheStats, Clock, LruTracker, MetricsSink, NoopSink, SlotId, SystemClock,
};

#[derive(Debug)]
struct Stored {
    entry: CacheEntry,
    slot: SlotId,
}

#[derive(Debug)]
struct EngineState {
    /// Key-value storage
    entries: HashMap<String, Stored>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
}

// == Cache Engine ==
/// Bounded LRU cache with per-entry TTL.
///
/// All engine state sits behind one mutex, so every operation
/// is linearizable with respect to every other on the same engine.
/// Expired entries are purged lazily when a Get finds them; there is no
/// background sweep.
#[derive(Debug)]
pub struct CacheEngine {
    /// Maximum number of entries allowed
    capacity: usize,
    state: Mutex<EngineState>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn MetricsSink>,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an engine holding at most `capacity` entries.
    ///
    /// Uses the system clock and discards metric events; see
    /// [`with_clock`](Self::with_clock) and [`with_metrics`](Self::with_metrics).
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            state: Mutex::new(EngineState {
                entries: HashMap::with_capacity(capacity),
                lru: LruTracker::with_capacity(capacity),
                stats: CacheStats::new(capacity),
            }),
            clock: Arc::new(SystemClock),
            sink: Arc::new(NoopSink),
        }
    }

    /// Replaces the time source used for expiry.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the sink receiving hit/miss/expiry/eviction events.
    pub fn with_metrics(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    // == Set ==
    /// Stores a value, expiring `ttl` from now. A zero TTL never expires.
    ///
    /// An existing key gets the new value and a fresh expiry. Either way the
    /// key becomes most recently used. Inserting past capacity evicts
    /// exactly one entry, the least recently used.
    pub fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl, self.clock.now());
        let mut guard = self.lock();
        let state = &mut *guard;

        if let Some(stored) = state.entries.get_mut(key) {
            stored.entry = entry;
            state.lru.touch(stored.slot);
            return;
        }

        let slot = state.lru.push_front(key.to_string());
        state.entries.insert(key.to_string(), Stored { entry, slot });

        if state.entries.len() > self.capacity {
            if let Some(evicted) = state.lru.evict_oldest() {
                state.entries.remove(&evicted);
                state.stats.record_eviction();
                self.sink.record_eviction();
            }
        }

        self.sink.set_size(state.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit marks the key most recently used but leaves its expiry alone.
    /// An expired entry is removed and reported as a miss.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let now = self.clock.now();
        let mut guard = self.lock();
        let state = &mut *guard;

        let Some(stored) = state.entries.get(key) else {
            state.stats.record_miss();
            self.sink.record_miss();
            return None;
        };

        if stored.entry.is_expired(now) {
            let slot = stored.slot;
            state.entries.remove(key);
            state.lru.remove(slot);
            state.stats.record_expired();
            self.sink.record_miss();
            self.sink.record_expired();
            self.sink.set_size(state.entries.len());
            return None;
        }

        let value = stored.entry.value.clone();
        state.lru.touch(stored.slot);
        state.stats.record_hit();
        self.sink.record_hit();
        Some(value)
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether an entry was present.
    pub fn delete(&self, key: &str) -> bool {
        let mut guard = self.lock();
        let state = &mut *guard;

        match state.entries.remove(key) {
            Some(stored) => {
                state.lru.remove(stored.slot);
                self.sink.set_size(state.entries.len());
                true
            }
            None => false,
        }
    }

    // == Metrics ==
    /// Returns cumulative counters and the current entry count.
    pub fn metrics(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            size: state.entries.len(),
            ..state.stats.clone()
        }
    }

    // == Recency Order ==
    /// Returns keys from most to least recently used, expired ones included.
    pub fn recency_order(&self) -> Vec<String> {
        self.lock().lru.keys()
    }

    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock()
    }
}
