//! Shardcache - A sharded in-memory cache
//!
//! A gateway places keys on cache nodes with a consistent-hash ring; each
//! node holds its keys in a bounded LRU cache with per-entry TTL.

pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod node;
pub mod ring;
pub mod server;

pub use cache::CacheEngine;
pub use config::{GatewayConfig, NodeConfig};
pub use error::{Result, ShardError};
pub use gateway::{Gateway, GatewayState};
pub use node::{CacheNodeService, NodeState};
pub use ring::HashRing;
