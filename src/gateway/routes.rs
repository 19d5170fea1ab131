//! Gateway Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{delete, get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    benchmark_handler, delete_handler, get_handler, health_handler, nodes_handler, set_handler,
    stats_handler, GatewayState,
};

/// Creates the gateway router with all endpoints configured.
///
/// `/set` also accepts POST and `/delete` also accepts POST for clients
/// that cannot send PUT or DELETE.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_gateway_router(state: GatewayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/get", get(get_handler))
        .route("/set", put(set_handler).post(set_handler))
        .route("/delete", delete(delete_handler).post(delete_handler))
        .route("/benchmark", get(benchmark_handler))
        .route("/nodes", get(nodes_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
