//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the source clients once from validated configuration
//! - Inject them into the reconciliation service
//!
//! Any startup error is fatal; there are no process-wide client globals.

use std::sync::Arc;
use thiserror::Error;

use crate::config::GatewayConfig;
use crate::groups::GroupService;
use crate::http::AppState;
use crate::offchain::{OffchainClient, OffchainError};
use crate::subgraph::{SubgraphClient, SubgraphError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build subgraph client: {0}")]
    Subgraph(#[from] SubgraphError),

    #[error("failed to build off-chain client: {0}")]
    Offchain(#[from] OffchainError),
}

/// Build the application state: clients, service and health probe.
pub fn build_state(config: &GatewayConfig) -> Result<AppState, StartupError> {
    let subgraph = SubgraphClient::new(config.subgraph.clone())?;
    let offchain = OffchainClient::new(&config.offchain)?;

    tracing::info!(
        subgraph = %subgraph.endpoints()[0],
        offchain = %offchain.groups_url(),
        "Group sources configured"
    );

    let service = GroupService::new(Arc::new(subgraph.clone()), Arc::new(offchain));
    Ok(AppState::new(service, Some(subgraph)))
}
