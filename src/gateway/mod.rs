//! Gateway Module
//!
//! Key-addressed HTTP front-end that routes every request to the node
//! owning the key.
//!
//! # Endpoints
//! - `GET /get?key=` - Fetch a value from its owner
//! - `PUT /set?key=&ttl=` - Store the request body under a key
//! - `DELETE /delete?key=` - Delete a key
//! - `GET /benchmark?keys=&exercise=` - Key distribution and round-trip timing
//! - `GET /nodes` - Node table
//! - `GET /stats` - Per-node cache metrics
//! - `GET /health` - Health check endpoint

pub mod client;
pub mod handlers;
pub mod routes;
pub mod routing;

pub use client::{HttpNodeClient, LocalNodeClient, NodeClient};
pub use handlers::GatewayState;
pub use routes::create_gateway_router;
pub use routing::{Gateway, Route};
