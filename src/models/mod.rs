//! Request and Response models for the gateway API and the node RPC
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod rpc;

// Re-export commonly used types
pub use requests::{BenchmarkParams, KeyParams, SetParams};
pub use responses::{
    AckResponse, BenchmarkResponse, ErrorResponse, HealthResponse, NodeInfo, NodeStats,
    NodesResponse, StatsResponse,
};
pub use rpc::{
    DeleteReply, DeleteRequest, GetReply, GetRequest, MetricsReply, MetricsRequest, SetReply,
    SetRequest,
};
