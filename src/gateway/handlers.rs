//! Gateway Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::{
    AckResponse, BenchmarkParams, BenchmarkResponse, HealthResponse, KeyParams, NodesResponse,
    SetParams, StatsResponse,
};

/// Gateway state shared across all handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub gateway: Arc<Gateway>,
}

impl GatewayState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// Handler for GET /get?key=
///
/// Responds with the raw stored bytes.
pub async fn get_handler(
    State(state): State<GatewayState>,
    Query(params): Query<KeyParams>,
) -> Result<Vec<u8>> {
    let key = params.key()?;
    state.gateway.get(key).await
}

/// Handler for PUT /set?key=&ttl=
///
/// Stores the request body as the value.
pub async fn set_handler(
    State(state): State<GatewayState>,
    Query(params): Query<SetParams>,
    body: Bytes,
) -> Result<Json<AckResponse>> {
    let key = params.key()?;
    let ttl = params.ttl()?;
    let node = state.gateway.set(key, body.to_vec(), ttl).await?;

    Ok(Json(AckResponse::set(key, node)))
}

/// Handler for DELETE /delete?key=
pub async fn delete_handler(
    State(state): State<GatewayState>,
    Query(params): Query<KeyParams>,
) -> Result<Json<AckResponse>> {
    let key = params.key()?;
    let node = state.gateway.delete(key).await?;

    Ok(Json(AckResponse::deleted(key, node)))
}

/// Handler for GET /benchmark?keys=&exercise=
pub async fn benchmark_handler(
    State(state): State<GatewayState>,
    Query(params): Query<BenchmarkParams>,
) -> Result<Json<BenchmarkResponse>> {
    let keys = params.keys()?;
    let exercise = params.exercise()?;

    Ok(Json(state.gateway.benchmark(keys, exercise).await))
}

/// Handler for GET /nodes
pub async fn nodes_handler(State(state): State<GatewayState>) -> Json<NodesResponse> {
    Json(NodesResponse {
        replicas: state.gateway.ring().replicas(),
        nodes: state.gateway.nodes(),
    })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<GatewayState>) -> Json<StatsResponse> {
    Json(state.gateway.stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
