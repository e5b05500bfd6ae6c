//! Group reconciliation service.
//!
//! # Responsibilities
//! - Map on-chain groups into the unified [`Group`] view
//! - Merge the same-named off-chain group into an on-chain group
//! - Turn source failures into logged `None` results
//!
//! Each `fetch_*` method returns the underlying error; the sentinel methods
//! (`list_groups_by_admin`, `get_group`, `get_associated_group`) log it and
//! return `None` instead, so callers can tell "could not determine" apart
//! from "nothing there".

use std::sync::Arc;

use crate::groups::name::parse_group_name;
use crate::groups::source::{OffchainGroupSource, OnChainGroupSource};
use crate::groups::types::{Group, GroupType, NameParser, ReconcileResult};
use crate::observability::metrics;
use crate::offchain::types::OffchainGroup;
use crate::subgraph::types::GroupOptions;

/// Read-only view over on-chain and off-chain groups.
#[derive(Clone)]
pub struct GroupService {
    on_chain: Arc<dyn OnChainGroupSource>,
    offchain: Arc<dyn OffchainGroupSource>,
    parse_name: NameParser,
}

impl GroupService {
    /// Create a service over the given sources.
    pub fn new(on_chain: Arc<dyn OnChainGroupSource>, offchain: Arc<dyn OffchainGroupSource>) -> Self {
        Self {
            on_chain,
            offchain,
            parse_name: parse_group_name,
        }
    }

    /// Replace the group-name parser.
    pub fn with_name_parser(mut self, parse_name: NameParser) -> Self {
        self.parse_name = parse_name;
        self
    }

    /// On-chain groups administered by `admin`, or `None` if the subgraph
    /// could not be queried.
    pub async fn list_groups_by_admin(&self, admin: &str) -> Option<Vec<Group>> {
        let result = self.fetch_groups_by_admin(admin).await;
        settle("list_groups_by_admin", admin, result)
    }

    /// A single on-chain group, or `None` on any failure.
    pub async fn get_group(&self, group_id: &str) -> Option<Group> {
        let result = self.fetch_group(group_id).await;
        settle("get_group", group_id, result)
    }

    /// A single on-chain group with the matching off-chain members appended,
    /// or `None` if either lookup failed.
    pub async fn get_associated_group(&self, group_id: &str) -> Option<Group> {
        let result = self.fetch_associated_group(group_id).await;
        settle("get_associated_group", group_id, result)
    }

    /// Like `list_groups_by_admin`, but returns the failure.
    pub async fn fetch_groups_by_admin(&self, admin: &str) -> ReconcileResult<Vec<Group>> {
        let groups = self.on_chain.get_groups(&GroupOptions::by_admin(admin)).await?;

        Ok(groups
            .into_iter()
            .map(|group| Group::from_on_chain(group, self.parse_name))
            .collect())
    }

    /// Like `get_group`, but returns the failure.
    pub async fn fetch_group(&self, group_id: &str) -> ReconcileResult<Group> {
        let group = self
            .on_chain
            .get_group(group_id, &GroupOptions::with_members())
            .await?;

        Ok(Group::from_on_chain(group, self.parse_name).with_fingerprint_duration())
    }

    /// Two stages: the on-chain group, then the off-chain group named after
    /// its id. The second stage only runs once the first has succeeded.
    pub async fn fetch_associated_group(&self, group_id: &str) -> ReconcileResult<Group> {
        let group = self.fetch_group(group_id).await?;

        let offchain = self
            .offchain
            .get_group_by_name(&group.id, GroupType::OnChain.as_str())
            .await?;

        Ok(merge_members(group, &offchain))
    }
}

impl std::fmt::Debug for GroupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupService").finish_non_exhaustive()
    }
}

/// Append the first off-chain group's members. Duplicates are kept.
fn merge_members(mut group: Group, offchain: &[OffchainGroup]) -> Group {
    if let Some(first) = offchain.first() {
        group.members.extend(first.members.iter().cloned());
    }
    group
}

fn settle<T>(operation: &'static str, key: &str, result: ReconcileResult<T>) -> Option<T> {
    match result {
        Ok(value) => {
            metrics::record_operation(operation, true);
            Some(value)
        }
        Err(e) => {
            metrics::record_operation(operation, false);
            tracing::error!(operation, key = %key, error = %e, "Group lookup failed");
            None
        }
    }
}
