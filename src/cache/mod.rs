//! Cache Module
//!
//! Per-node in-memory cache with LRU eviction and lazy TTL expiration.

mod clock;
mod engine;
mod entry;
mod lru;
mod metrics;
mod stats;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::CacheEngine;
pub use entry::CacheEntry;
pub use lru::{LruTracker, SlotId};
pub use metrics::{CounterSink, MetricsSink, NoopSink, PrometheusSink};
pub use stats::CacheStats;

// == Public Constants ==
/// Default number of entries a node holds
pub const DEFAULT_CAPACITY: usize = 1024;
