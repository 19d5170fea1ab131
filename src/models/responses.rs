//! Response DTOs for the gateway and node HTTP APIs
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::models::MetricsReply;

/// Acknowledgement for `PUT /set` and `DELETE /delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    /// Success message
    pub message: String,
    /// The key that was written
    pub key: String,
    /// Node that owns the key
    pub node: String,
}

impl AckResponse {
    pub fn set(key: impl Into<String>, node: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            node: node.into(),
        }
    }

    pub fn deleted(key: impl Into<String>, node: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
            node: node.into(),
        }
    }
}

/// Response body for `GET /benchmark`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResponse {
    /// Number of synthetic keys generated
    pub keys: usize,
    /// Wall-clock time for the whole run
    pub latency_ms: u64,
    /// Keys owned by each live node
    pub distribution: BTreeMap<String, usize>,
    /// RPCs that failed while exercising owners
    pub failures: usize,
}

/// One entry of the gateway's node table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: String,
    pub addr: String,
}

/// Response body for `GET /nodes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodesResponse {
    /// Virtual points per node
    pub replicas: usize,
    pub nodes: Vec<NodeInfo>,
}

/// Metrics of one node, or why they could not be fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStats {
    pub addr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub nodes: BTreeMap<String, NodeStats>,
    /// Hit rate over all reachable nodes
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(nodes: BTreeMap<String, NodeStats>) -> Self {
        let totals = nodes
            .values()
            .filter_map(|n| n.metrics.as_ref())
            .fold(CacheStats::default(), |mut acc, metrics| {
                acc.hits += metrics.hits;
                acc.misses += metrics.misses;
                acc
            });
        Self {
            nodes,
            hit_rate: totals.hit_rate(),
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}
