//! Error types for the cache gateway and nodes
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Shard Error Enum ==
/// Failures surfaced at the HTTP and RPC boundaries.
///
/// The ring and the cache engine never fail; every variant here comes from
/// request validation or from talking to a remote node.
#[derive(Error, Debug)]
pub enum ShardError {
    /// Key absent or expired on its owning node
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Malformed external input, rejected before any routing
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Owning node could not be reached or did not answer in time
    #[error("Node unavailable: {0}")]
    NodeUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShardError {
    /// Returns the HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ShardError::NotFound(_) => StatusCode::NOT_FOUND,
            ShardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ShardError::NodeUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ShardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ShardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache gateway and nodes.
pub type Result<T> = std::result::Result<T, ShardError>;
