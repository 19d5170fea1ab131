//! Node Handlers
//!
//! HTTP handlers for the cache node RPC surface.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::{CacheEngine, PrometheusSink};
use crate::config::NodeConfig;
use crate::models::{
    DeleteReply, DeleteRequest, GetReply, GetRequest, HealthResponse, MetricsReply,
    MetricsRequest, SetReply, SetRequest,
};
use crate::node::CacheNodeService;

/// Node state shared across all handlers.
#[derive(Clone)]
pub struct NodeState {
    pub service: CacheNodeService,
    /// Recorder published at `GET /metrics`
    pub sink: Arc<PrometheusSink>,
}

impl NodeState {
    /// Creates a node with a fresh engine of the given capacity.
    pub fn new(capacity: usize) -> Self {
        let sink = Arc::new(PrometheusSink::new());
        let engine = CacheEngine::new(capacity).with_metrics(sink.clone());
        Self {
            service: CacheNodeService::new(Arc::new(engine)),
            sink,
        }
    }

    /// Creates a node from configuration.
    pub fn from_config(config: &NodeConfig) -> Self {
        Self::new(config.capacity)
    }
}

/// Handler for POST /rpc/get
pub async fn get_handler(
    State(state): State<NodeState>,
    Json(req): Json<GetRequest>,
) -> Json<GetReply> {
    Json(state.service.get(req))
}

/// Handler for POST /rpc/set
pub async fn set_handler(
    State(state): State<NodeState>,
    Json(req): Json<SetRequest>,
) -> Json<SetReply> {
    Json(state.service.set(req))
}

/// Handler for POST /rpc/delete
pub async fn delete_handler(
    State(state): State<NodeState>,
    Json(req): Json<DeleteRequest>,
) -> Json<DeleteReply> {
    Json(state.service.delete(req))
}

/// Handler for POST /rpc/metrics
///
/// The request body is ignored.
pub async fn metrics_handler(State(state): State<NodeState>) -> Json<MetricsReply> {
    Json(state.service.metrics(MetricsRequest {}))
}

/// Handler for GET /metrics
pub async fn prometheus_handler(State(state): State<NodeState>) -> String {
    state.sink.render()
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
