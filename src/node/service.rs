//! Cache Node Service
//!
//! Translates RPC messages into cache engine calls and back.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::CacheEngine;
use crate::models::{
    DeleteReply, DeleteRequest, GetReply, GetRequest, MetricsReply, MetricsRequest, SetReply,
    SetRequest,
};

/// Converts a wire TTL in seconds into an engine TTL.
///
/// Zero or negative TTLs map to `Duration::ZERO`, which the engine treats
/// as "never expires".
pub fn ttl_from_seconds(ttl: i64) -> Duration {
    u64::try_from(ttl)
        .map(Duration::from_secs)
        .unwrap_or(Duration::ZERO)
}

// == Cache Node Service ==
/// Stateless shim over a single cache engine.
#[derive(Debug, Clone)]
pub struct CacheNodeService {
    engine: Arc<CacheEngine>,
}

impl CacheNodeService {
    pub fn new(engine: Arc<CacheEngine>) -> Self {
        Self { engine }
    }

    /// Creates a service over a fresh engine holding `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(Arc::new(CacheEngine::new(capacity)))
    }

    pub fn engine(&self) -> &Arc<CacheEngine> {
        &self.engine
    }

    pub fn get(&self, req: GetRequest) -> GetReply {
        let reply = GetReply::from(self.engine.get(&req.key));
        debug!(key = %req.key, found = reply.found, "rpc get");
        reply
    }

    pub fn set(&self, req: SetRequest) -> SetReply {
        debug!(key = %req.key, bytes = req.value.len(), ttl = req.ttl, "rpc set");
        self.engine
            .set(&req.key, req.value, ttl_from_seconds(req.ttl));
        SetReply {}
    }

    pub fn delete(&self, req: DeleteRequest) -> DeleteReply {
        let removed = self.engine.delete(&req.key);
        debug!(key = %req.key, removed, "rpc delete");
        DeleteReply {}
    }

    pub fn metrics(&self, _req: MetricsRequest) -> MetricsReply {
        MetricsReply::from(self.engine.metrics())
    }
}
