//! Group reconciler (v1)
//!
//! Serves a read-only view of identity groups.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────┐
//!                       │              GROUP RECONCILER              │
//!                       │                                            │
//!     GET /groups/...   │  ┌─────────┐    ┌──────────────┐           │
//!     ──────────────────┼─▶│  http   │───▶│ GroupService │           │
//!                       │  │ server  │    └──────┬───────┘           │
//!                       │  └─────────┘           │                   │
//!                       │              ┌─────────┴─────────┐         │
//!                       │              ▼                   ▼         │
//!                       │      ┌──────────────┐   ┌──────────────┐   │     Subgraph
//!                       │      │   subgraph   │   │   offchain   │───┼──── / Off-chain
//!                       │      │    client    │   │    client    │   │     group API
//!                       │      └──────────────┘   └──────────────┘   │
//!                       │                                            │
//!                       │   config · observability · lifecycle      │
//!                       └────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use group_reconciler::config::load_config;
use group_reconciler::http::HttpServer;
use group_reconciler::lifecycle::{build_state, signals, Shutdown};
use group_reconciler::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "group-reconciler", version)]
#[command(about = "Read API for on-chain identity groups merged with off-chain membership")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "GROUPS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability)?;

    tracing::info!("group-reconciler v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        network = %config.subgraph.network,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let state = build_state(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(&config, state);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
