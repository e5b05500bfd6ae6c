//! Capabilities consumed by the reconciliation service.

use async_trait::async_trait;

use crate::offchain::types::{OffchainGroup, OffchainResult};
use crate::subgraph::types::{GroupOptions, OnChainGroup, SubgraphResult};

/// Read access to groups indexed on-chain.
#[async_trait]
pub trait OnChainGroupSource: Send + Sync {
    /// Fetch every group matching `options.filters`.
    async fn get_groups(&self, options: &GroupOptions) -> SubgraphResult<Vec<OnChainGroup>>;

    /// Fetch one group. Fails if it does not exist.
    async fn get_group(&self, group_id: &str, options: &GroupOptions) -> SubgraphResult<OnChainGroup>;
}

/// Lookup of groups kept in the off-chain store.
#[async_trait]
pub trait OffchainGroupSource: Send + Sync {
    /// Groups with the given name and type. No match yields an empty vector.
    async fn get_group_by_name(&self, name: &str, group_type: &str) -> OffchainResult<Vec<OffchainGroup>>;
}
