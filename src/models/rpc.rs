//! Node RPC messages
//!
//! JSON bodies exchanged between the gateway and cache nodes. Byte values
//! travel base64-encoded.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;

/// Serde adapter for byte values carried as base64 strings.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// Body of `POST /rpc/get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {
    pub key: String,
}

/// Reply to `POST /rpc/get`. `value` is empty when `found` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReply {
    #[serde(with = "base64_bytes", default)]
    pub value: Vec<u8>,
    pub found: bool,
}

impl GetReply {
    pub fn found(value: Vec<u8>) -> Self {
        Self { value, found: true }
    }

    pub fn missing() -> Self {
        Self {
            value: Vec::new(),
            found: false,
        }
    }
}

impl From<Option<Vec<u8>>> for GetReply {
    fn from(value: Option<Vec<u8>>) -> Self {
        value.map_or_else(Self::missing, Self::found)
    }
}

/// Body of `POST /rpc/set`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRequest {
    pub key: String,
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
    /// TTL in seconds; zero or negative means the entry never expires
    #[serde(default)]
    pub ttl: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReply {}

/// Body of `POST /rpc/delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReply {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsRequest {}

/// Reply to `POST /rpc/metrics`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReply {
    pub hits: u64,
    pub misses: u64,
    #[serde(default)]
    pub expired: u64,
    #[serde(default)]
    pub evictions: u64,
    pub size: u64,
    #[serde(default)]
    pub capacity: u64,
}

impl From<CacheStats> for MetricsReply {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            evictions: stats.evictions,
            size: stats.size as u64,
            capacity: stats.capacity as u64,
        }
    }
}
