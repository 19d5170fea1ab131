//! Node Module
//!
//! Binds one cache engine to the RPC surface the gateway calls.
//!
//! # Endpoints
//! - `POST /rpc/get` - Look up a key
//! - `POST /rpc/set` - Store a key with TTL
//! - `POST /rpc/delete` - Remove a key
//! - `POST /rpc/metrics` - Hit/miss/size counters
//! - `GET /metrics` - Counters in Prometheus text format
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;
pub mod service;

pub use handlers::NodeState;
pub use routes::create_node_router;
pub use service::{ttl_from_seconds, CacheNodeService};
