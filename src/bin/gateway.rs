//! Gateway server
//!
//! HTTP front-end routing each key to the cache node that owns it.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Build the hash ring and node client
//! 4. Start the HTTP server and wait for SIGINT/SIGTERM

use anyhow::Context;
use tracing::{info, warn};

use shardcache::{
    config::GatewayConfig, gateway::create_gateway_router, server, Gateway, GatewayState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing("shardcache=info,tower_http=info");

    info!("Starting gateway");

    let config = GatewayConfig::from_env();
    info!(
        "Configuration loaded: port={}, nodes={}, replicas={}, rpc_timeout={:?}",
        config.port,
        config.nodes.len(),
        config.replicas,
        config.rpc_timeout
    );
    if config.nodes.is_empty() {
        warn!("NODES is empty; every key request will fail until nodes are configured");
    }
    for (id, addr) in &config.nodes {
        info!(node = %id, addr = %addr, "Registered node");
    }

    let gateway = Gateway::from_config(&config).context("failed to build gateway")?;
    let app = create_gateway_router(GatewayState::new(gateway));

    server::serve(app, config.port)
        .await
        .with_context(|| format!("gateway server on port {} failed", config.port))?;

    info!("Gateway shutdown complete");
    Ok(())
}
