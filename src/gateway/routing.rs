//! Gateway Routing
//!
//! Resolves each key to its owning node through the hash ring and forwards
//! the operation to that node. One owner per key, no retry, no failover.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::error::{Result, ShardError};
use crate::gateway::{HttpNodeClient, NodeClient};
use crate::models::{
    BenchmarkResponse, DeleteRequest, GetRequest, NodeInfo, NodeStats, SetRequest, StatsResponse,
};
use crate::ring::HashRing;

/// Value written to each synthetic key during a benchmark
const BENCHMARK_VALUE: &[u8] = b"value";

/// TTL in seconds of synthetic benchmark keys
const BENCHMARK_TTL_SECS: i64 = 60;

/// Owner of a key at the moment it was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub node: String,
    pub addr: String,
}

// == Gateway ==
/// Routing front-end over a set of cache nodes.
///
/// Membership changes and in-flight requests are not coordinated: a request
/// resolved just before a change still goes to the previous owner.
#[derive(Debug)]
pub struct Gateway {
    ring: HashRing,
    /// Node id -> `host:port`
    nodes: RwLock<BTreeMap<String, String>>,
    client: Arc<dyn NodeClient>,
}

impl Gateway {
    // == Constructor ==
    /// Creates a gateway over `nodes` with `replicas` virtual points per node.
    pub fn new(
        nodes: BTreeMap<String, String>,
        replicas: usize,
        client: Arc<dyn NodeClient>,
    ) -> Self {
        let ring = HashRing::new(replicas);
        for id in nodes.keys() {
            ring.add_node(id);
        }

        Self {
            ring,
            nodes: RwLock::new(nodes),
            client,
        }
    }

    /// Creates a gateway talking HTTP to the configured nodes.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = HttpNodeClient::new(config.rpc_timeout)?;
        Ok(Self::new(
            config.nodes.clone(),
            config.replicas,
            Arc::new(client),
        ))
    }

    // == Resolve ==
    /// Finds the node owning `key` and its address.
    pub fn resolve(&self, key: &str) -> Result<Route> {
        let node = self
            .ring
            .lookup(key)
            .ok_or_else(|| ShardError::NodeUnavailable("No cache nodes configured".into()))?;

        let addr = self
            .read_nodes()
            .get(&node)
            .cloned()
            .ok_or_else(|| ShardError::NodeUnavailable(format!("No address for node {}", node)))?;

        debug!(key, node = %node, addr = %addr, "Resolved owner");
        Ok(Route { node, addr })
    }

    // == Get ==
    /// Fetches `key` from its owner.
    pub async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let route = self.resolve(key)?;
        let reply = self
            .client
            .get(&route.addr, GetRequest { key: key.into() })
            .await
            .inspect_err(|e| log_unavailable(&route, e))?;

        if reply.found {
            Ok(reply.value)
        } else {
            Err(ShardError::NotFound(key.to_string()))
        }
    }

    // == Set ==
    /// Stores `key` on its owner. Returns the owning node id.
    pub async fn set(&self, key: &str, value: Vec<u8>, ttl: i64) -> Result<String> {
        let route = self.resolve(key)?;
        self.client
            .set(
                &route.addr,
                SetRequest {
                    key: key.into(),
                    value,
                    ttl,
                },
            )
            .await
            .inspect_err(|e| log_unavailable(&route, e))?;

        Ok(route.node)
    }

    // == Delete ==
    /// Removes `key` from its owner. Returns the owning node id.
    pub async fn delete(&self, key: &str) -> Result<String> {
        let route = self.resolve(key)?;
        self.client
            .delete(&route.addr, DeleteRequest { key: key.into() })
            .await
            .inspect_err(|e| log_unavailable(&route, e))?;

        Ok(route.node)
    }

    // == Benchmark ==
    /// Routes `keys` synthetic keys and reports the per-node distribution.
    ///
    /// With `exercise` set, each key is also written and read back on its
    /// owner. Failed calls are logged and counted, never fatal.
    pub async fn benchmark(&self, keys: usize, exercise: bool) -> BenchmarkResponse {
        let start = Instant::now();
        let names: Vec<String> = (0..keys).map(|i| format!("bench{}", i)).collect();
        let distribution = self.ring.distribution(&names);

        let mut failures = 0;
        if exercise {
            for key in &names {
                if let Err(e) = self.exercise_key(key).await {
                    warn!(key = %key, error = %e, "Benchmark call failed");
                    failures += 1;
                }
            }
        }

        let latency_ms = start.elapsed().as_millis() as u64;
        info!(keys, exercise, failures, latency_ms, "Benchmark complete");

        BenchmarkResponse {
            keys,
            latency_ms,
            distribution,
            failures,
        }
    }

    async fn exercise_key(&self, key: &str) -> Result<()> {
        let route = self.resolve(key)?;
        self.client
            .set(
                &route.addr,
                SetRequest {
                    key: key.into(),
                    value: BENCHMARK_VALUE.to_vec(),
                    ttl: BENCHMARK_TTL_SECS,
                },
            )
            .await?;
        self.client
            .get(&route.addr, GetRequest { key: key.into() })
            .await?;
        Ok(())
    }

    // == Stats ==
    /// Collects metrics from every node. Unreachable nodes are reported
    /// with their error rather than failing the whole call.
    pub async fn stats(&self) -> StatsResponse {
        let mut report = BTreeMap::new();

        for NodeInfo { id, addr } in self.nodes() {
            let stats = match self.client.metrics(&addr).await {
                Ok(metrics) => NodeStats {
                    addr,
                    metrics: Some(metrics),
                    error: None,
                },
                Err(e) => {
                    warn!(node = %id, error = %e, "Failed to collect node metrics");
                    NodeStats {
                        addr,
                        metrics: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            report.insert(id, stats);
        }

        StatsResponse::new(report)
    }

    // == Membership ==
    /// Adds a node, or updates its address if already known.
    ///
    /// Existing entries are not migrated; keys that now map to the new node
    /// miss until rewritten.
    pub fn add_node(&self, id: &str, addr: &str) {
        self.write_nodes().insert(id.to_string(), addr.to_string());
        self.ring.add_node(id);
        info!(node = id, addr, "Node joined");
    }

    /// Removes a node. Its keys become unreachable and route elsewhere.
    pub fn remove_node(&self, id: &str) {
        self.ring.remove_node(id);
        if self.write_nodes().remove(id).is_some() {
            info!(node = id, "Node left");
        }
    }

    /// Returns the node table, sorted by id.
    pub fn nodes(&self) -> Vec<NodeInfo> {
        self.read_nodes()
            .iter()
            .map(|(id, addr)| NodeInfo {
                id: id.clone(),
                addr: addr.clone(),
            })
            .collect()
    }

    pub fn ring(&self) -> &HashRing {
        &self.ring
    }

    fn read_nodes(&self) -> RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.nodes.read()
    }

    fn write_nodes(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.nodes.write()
    }
}

fn log_unavailable(route: &Route, error: &ShardError) {
    warn!(node = %route.node, addr = %route.addr, error = %error, "Owner unavailable");
}
