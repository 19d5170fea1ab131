//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value and the instant it stops being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: Vec<u8>,
    /// Absolute expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` after `now`.
    ///
    /// A zero TTL means the entry never expires; it then leaves the cache
    /// only through Delete or LRU eviction.
    pub fn new(value: Vec<u8>, ttl: Duration, now: Instant) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            now.checked_add(ttl)
        };

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is still served at exactly its expiration instant and
    /// expires strictly after it.
    pub fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(expires) if now > expires)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_no_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new(b"test_value".to_vec(), Duration::ZERO, now);

        assert_eq!(entry.value, b"test_value");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(now + Duration::from_secs(3600)));
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new(b"v".to_vec(), Duration::from_secs(60), now);

        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(60)));
        assert!(!entry.is_expired(now));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let ttl = Duration::from_millis(10);
        let entry = CacheEntry::new(b"v".to_vec(), ttl, now);

        // Still valid at exactly the expiry instant
        assert!(!entry.is_expired(now + ttl));
        assert!(entry.is_expired(now + ttl + Duration::from_nanos(1)));
    }
}
