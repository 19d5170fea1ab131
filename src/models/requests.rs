//! Request DTOs for the gateway API
//!
//! Query parameters of the key-addressed endpoints. Fields are taken as raw
//! strings and validated here so malformed input gets the same JSON error
//! body as every other failure.

use serde::Deserialize;

use crate::error::{Result, ShardError};

/// Default number of synthetic keys for `/benchmark`
pub const DEFAULT_BENCHMARK_KEYS: usize = 1000;

/// Upper bound on synthetic keys for `/benchmark`
pub const MAX_BENCHMARK_KEYS: usize = 100_000;

/// Checks that a key is present and non-empty. Any other key is routable.
pub fn validate_key(key: Option<&str>) -> Result<&str> {
    let key = key.ok_or_else(|| ShardError::InvalidRequest("Missing 'key' parameter".into()))?;
    if key.is_empty() {
        return Err(ShardError::InvalidRequest("Key cannot be empty".into()));
    }
    Ok(key)
}

/// Query of `GET /get` and `DELETE /delete`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyParams {
    pub key: Option<String>,
}

impl KeyParams {
    pub fn key(&self) -> Result<&str> {
        validate_key(self.key.as_deref())
    }
}

/// Query of `PUT /set`; the value is the raw request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetParams {
    pub key: Option<String>,
    /// TTL in seconds; absent, zero or negative means no expiry
    pub ttl: Option<String>,
}

impl SetParams {
    pub fn key(&self) -> Result<&str> {
        validate_key(self.key.as_deref())
    }

    pub fn ttl(&self) -> Result<i64> {
        match self.ttl.as_deref().map(str::trim) {
            None | Some("") => Ok(0),
            Some(raw) => raw.parse().map_err(|_| {
                ShardError::InvalidRequest(format!("Invalid ttl '{}': expected integer seconds", raw))
            }),
        }
    }
}

/// Query of `GET /benchmark`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarkParams {
    /// Number of synthetic keys
    pub keys: Option<String>,
    /// Whether to issue Set+Get against each owner
    pub exercise: Option<String>,
}

impl BenchmarkParams {
    pub fn keys(&self) -> Result<usize> {
        let Some(raw) = self.keys.as_deref() else {
            return Ok(DEFAULT_BENCHMARK_KEYS);
        };
        match raw.trim().parse::<usize>() {
            Ok(n) if n <= MAX_BENCHMARK_KEYS => Ok(n),
            _ => Err(ShardError::InvalidRequest(format!(
                "Invalid keys '{}': expected 0..={}",
                raw, MAX_BENCHMARK_KEYS
            ))),
        }
    }

    pub fn exercise(&self) -> Result<bool> {
        match self.exercise.as_deref() {
            None => Ok(true),
            Some(raw) => raw.trim().parse().map_err(|_| {
                ShardError::InvalidRequest(format!("Invalid exercise '{}': expected true or false", raw))
            }),
        }
    }
}
