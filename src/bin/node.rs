//! Cache node server
//!
//! Serves one cache engine over the node RPC surface.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Create the cache engine with the configured capacity
//! 4. Start the RPC server and wait for SIGINT/SIGTERM

use anyhow::Context;
use tracing::info;

use shardcache::{config::NodeConfig, node::create_node_router, server, NodeState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing("shardcache=info,tower_http=info");

    info!("Starting cache node");

    let config = NodeConfig::from_env();
    info!(
        "Configuration loaded: port={}, capacity={}",
        config.port, config.capacity
    );

    let state = NodeState::from_config(&config);
    info!("Cache engine initialized");

    server::serve(create_node_router(state), config.port)
        .await
        .with_context(|| format!("node server on port {} failed", config.port))?;

    info!("Node shutdown complete");
    Ok(())
}
