//! Unified group view and reconciliation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::offchain::types::OffchainError;
use crate::subgraph::types::{OnChainGroup, SubgraphError};

/// Validity window, in seconds, attached to single-group lookups.
pub const FINGERPRINT_DURATION_SECS: u64 = 3600;

/// Converts a raw on-chain group id into a display name.
pub type NameParser = fn(&str) -> String;

/// Provenance of a group record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupType {
    #[serde(rename = "on-chain")]
    OnChain,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::OnChain => "on-chain",
        }
    }
}

/// A group as returned to callers.
///
/// Always grounded in a successful on-chain fetch, so `group_type` is
/// `OnChain` even when off-chain members were merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub tree_depth: u32,
    /// Only set on single-group lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint_duration: Option<u64>,
    /// On-chain members first, then any merged off-chain members.
    pub members: Vec<String>,
    pub admin: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
}

impl Group {
    /// Build the unified view of an on-chain group.
    pub fn from_on_chain(group: OnChainGroup, parse_name: NameParser) -> Self {
        Self {
            name: parse_name(&group.id),
            id: group.id,
            tree_depth: group.merkle_tree.depth,
            fingerprint_duration: None,
            members: group.members,
            admin: group.admin,
            group_type: GroupType::OnChain,
        }
    }

    /// Attach the fixed fingerprint validity window.
    pub fn with_fingerprint_duration(mut self) -> Self {
        self.fingerprint_duration = Some(FINGERPRINT_DURATION_SECS);
        self
    }
}

/// Errors raised while building a unified group.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("on-chain lookup failed: {0}")]
    OnChain(#[from] SubgraphError),

    #[error("off-chain lookup failed: {0}")]
    OffChain(#[from] OffchainError),
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;
