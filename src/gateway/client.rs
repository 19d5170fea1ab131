//! Node Clients
//!
//! How the gateway reaches a cache node. `HttpNodeClient` talks to remote
//! nodes over HTTP with a fixed per-call deadline; `LocalNodeClient` calls
//! in-process services directly.

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Result, ShardError};
use crate::models::{
    DeleteReply, DeleteRequest, GetReply, GetRequest, MetricsReply, MetricsRequest, SetReply,
    SetRequest,
};
use crate::node::CacheNodeService;

// == Node Client ==
/// RPC surface of a cache node, addressed by `host:port`.
///
/// Any transport failure is reported as `ShardError::NodeUnavailable`.
/// Implementations never retry.
#[async_trait]
pub trait NodeClient: Send + Sync + Debug {
    async fn get(&self, addr: &str, req: GetRequest) -> Result<GetReply>;
    async fn set(&self, addr: &str, req: SetRequest) -> Result<SetReply>;
    async fn delete(&self, addr: &str, req: DeleteRequest) -> Result<DeleteReply>;
    async fn metrics(&self, addr: &str) -> Result<MetricsReply>;
}

// == HTTP Node Client ==
/// JSON-over-HTTP client for remote nodes.
#[derive(Debug, Clone)]
pub struct HttpNodeClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpNodeClient {
    /// Creates a client whose calls fail after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| ShardError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, timeout })
    }

    async fn call<Req, Rep>(&self, addr: &str, path: &str, req: &Req) -> Result<Rep>
    where
        Req: Serialize + Sync,
        Rep: DeserializeOwned,
    {
        let url = format!("http://{}{}", addr, path);
        let unavailable = |e: reqwest::Error| {
            let reason = if e.is_timeout() {
                format!("{} timed out after {:?}", addr, self.timeout)
            } else {
                format!("{}: {}", addr, e)
            };
            ShardError::NodeUnavailable(reason)
        };

        self.http
            .post(&url)
            .json(req)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unavailable)?
            .json::<Rep>()
            .await
            .map_err(unavailable)
    }
}

#[async_trait]
impl NodeClient for HttpNodeClient {
    async fn get(&self, addr: &str, req: GetRequest) -> Result<GetReply> {
        self.call(addr, "/rpc/get", &req).await
    }

    async fn set(&self, addr: &str, req: SetRequest) -> Result<SetReply> {
        self.call(addr, "/rpc/set", &req).await
    }

    async fn delete(&self, addr: &str, req: DeleteRequest) -> Result<DeleteReply> {
        self.call(addr, "/rpc/delete", &req).await
    }

    async fn metrics(&self, addr: &str) -> Result<MetricsReply> {
        self.call(addr, "/rpc/metrics", &MetricsRequest {}).await
    }
}

// == Local Node Client ==
/// Client dispatching straight to in-process node services.
///
/// An address with no registered service behaves like an unreachable node.
#[derive(Debug, Clone, Default)]
pub struct LocalNodeClient {
    services: HashMap<String, CacheNodeService>,
}

impl LocalNodeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `service` as the node listening on `addr`.
    pub fn with_node(mut self, addr: impl Into<String>, service: CacheNodeService) -> Self {
        self.services.insert(addr.into(), service);
        self
    }

    fn service(&self, addr: &str) -> Result<&CacheNodeService> {
        self.services
            .get(addr)
            .ok_or_else(|| ShardError::NodeUnavailable(format!("{}: connection refused", addr)))
    }
}

#[async_trait]
impl NodeClient for LocalNodeClient {
    async fn get(&self, addr: &str, req: GetRequest) -> Result<GetReply> {
        Ok(self.service(addr)?.get(req))
    }

    async fn set(&self, addr: &str, req: SetRequest) -> Result<SetReply> {
        Ok(self.service(addr)?.set(req))
    }

    async fn delete(&self, addr: &str, req: DeleteRequest) -> Result<DeleteReply> {
        Ok(self.service(addr)?.delete(req))
    }

    async fn metrics(&self, addr: &str) -> Result<MetricsReply> {
        Ok(self.service(addr)?.metrics(MetricsRequest {}))
    }
}
