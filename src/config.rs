//! Configuration Module
//!
//! Handles loading node and gateway configuration from environment variables.
//! The core types never read the environment; binaries load these structs
//! and pass plain values into constructors.

use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::DEFAULT_CAPACITY;

/// Reads a variable and parses it, falling back to `default` when unset or
/// unparsable.
fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Like [`parse_var`] over several names; the first set and parsable one wins.
fn parse_var_any<T, F>(lookup: &F, names: &[&str], default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .find_map(|name| lookup(name).and_then(|v| v.trim().parse().ok()))
        .unwrap_or(default)
}

fn from_process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

// == Node Config ==
/// Cache node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Port the node RPC server listens on
    pub port: u16,
    /// Maximum number of entries the node's cache holds
    pub capacity: usize,
}

impl NodeConfig {
    /// Loads node configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `NODE_PORT` - RPC server port (default: 50051)
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1024)
    ///
    /// `NODE_GRPC_PORT` and `CACHE_SIZE_MB` are read as fallbacks for
    /// deployments written against the older names. `CACHE_SIZE_MB` is an
    /// entry count despite its name.
    pub fn from_env() -> Self {
        Self::from_lookup(from_process_env)
    }

    /// Loads node configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            port: parse_var_any(&lookup, &["NODE_PORT", "NODE_GRPC_PORT"], defaults.port),
            capacity: parse_var_any(
                &lookup,
                &["CACHE_CAPACITY", "CACHE_SIZE_MB"],
                defaults.capacity,
            ),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            port: 50051,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

// == Gateway Config ==
/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// HTTP port the gateway listens on
    pub port: u16,
    /// Node id -> `host:port` address
    pub nodes: BTreeMap<String, String>,
    /// Virtual points per node on the hash ring
    pub replicas: usize,
    /// Deadline for each gateway-to-node RPC
    pub rpc_timeout: Duration,
}

impl GatewayConfig {
    /// Loads gateway configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `GATEWAY_HTTP_PORT` - HTTP port (default: 8080)
    /// - `NODES` - Comma-separated `id:host:port` entries (default: none)
    /// - `SHARDO_REPLICATION_FACTOR` - Virtual points per node, > 0 (default: 2)
    /// - `RPC_TIMEOUT_MS` - Per-call RPC deadline in milliseconds (default: 2000)
    pub fn from_env() -> Self {
        Self::from_lookup(from_process_env)
    }

    /// Loads gateway configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let replicas = match parse_var(&lookup, "SHARDO_REPLICATION_FACTOR", defaults.replicas) {
            0 => defaults.replicas,
            n => n,
        };
        let timeout_ms = parse_var(
            &lookup,
            "RPC_TIMEOUT_MS",
            defaults.rpc_timeout.as_millis() as u64,
        );

        Self {
            port: parse_var(&lookup, "GATEWAY_HTTP_PORT", defaults.port),
            nodes: lookup("NODES")
                .map(|spec| parse_nodes(&spec))
                .unwrap_or_default(),
            replicas,
            rpc_timeout: Duration::from_millis(timeout_ms.max(1)),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            nodes: BTreeMap::new(),
            replicas: 2,
            rpc_timeout: Duration::from_secs(2),
        }
    }
}

// == Parse Nodes ==
/// Parses a node table of the form `id:host:port,id:host:port`.
///
/// Entries that do not have exactly three `:`-separated parts are skipped
/// with a warning.
pub fn parse_nodes(spec: &str) -> BTreeMap<String, String> {
    let mut nodes = BTreeMap::new();

    for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let parts: Vec<&str> = pair.split(':').collect();
        match parts.as_slice() {
            [id, host, port] if !id.is_empty() && !host.is_empty() && !port.is_empty() => {
                nodes.insert(id.to_string(), format!("{host}:{port}"));
            }
            _ => warn!(entry = pair, "Skipping malformed node entry"),
        }
    }

    nodes
}
