//! On-chain group types and error definitions.

use serde::Deserialize;
use thiserror::Error;

// Re-export SubgraphConfig from config module to avoid duplication
pub use crate::config::schema::SubgraphConfig;

/// Merkle tree commitment of an on-chain group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MerkleTree {
    /// Tree height; a group holds at most 2^depth members.
    pub depth: u32,
}

/// A group as indexed by the subgraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainGroup {
    pub id: String,
    pub admin: String,
    pub merkle_tree: MerkleTree,
    /// Identity commitments in tree insertion order. Empty unless requested.
    pub members: Vec<String>,
}

/// Filters applied to a group listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilters {
    /// Only return groups administered by this address.
    pub admin: Option<String>,
}

/// Options for group queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOptions {
    /// Include the member list.
    pub members: bool,
    pub filters: GroupFilters,
}

impl GroupOptions {
    /// Options requesting members and no filters.
    pub fn with_members() -> Self {
        Self {
            members: true,
            ..Self::default()
        }
    }

    /// Options requesting members of the groups administered by `admin`.
    pub fn by_admin(admin: &str) -> Self {
        Self {
            members: true,
            filters: GroupFilters {
                admin: Some(admin.to_string()),
            },
        }
    }
}

/// Errors that can occur while querying the subgraph.
#[derive(Debug, Error)]
pub enum SubgraphError {
    /// Connection failed or request timed out.
    #[error("Subgraph transport error: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success status.
    #[error("Subgraph returned HTTP {0}")]
    Http(u16),

    /// GraphQL-level error reported by the subgraph.
    #[error("Subgraph query error: {0}")]
    Query(String),

    /// Response body could not be decoded.
    #[error("Invalid subgraph response: {0}")]
    InvalidResponse(String),

    /// No group with the requested id is indexed.
    #[error("Group {0} does not exist")]
    GroupNotFound(String),

    /// Every configured endpoint failed.
    #[error("All subgraph endpoints failed")]
    AllEndpointsFailed,

    /// Network name has no known subgraph.
    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    /// Endpoint URL could not be parsed.
    #[error("Invalid subgraph URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl SubgraphError {
    /// Whether the next failover endpoint should be tried after this error.
    pub fn is_failover(&self) -> bool {
        matches!(self, SubgraphError::Transport(_) | SubgraphError::Http(_))
    }
}

/// Result type for subgraph operations.
pub type SubgraphResult<T> = Result<T, SubgraphError>;

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroupsData {
    pub groups: Vec<GroupNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupNode {
    pub id: String,
    pub admin: Option<String>,
    pub merkle_tree: MerkleTree,
    pub members: Option<Vec<MemberNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MemberNode {
    /// Leaf index; the cursor for member pagination.
    #[serde(default)]
    pub index: Option<BigIntValue>,
    pub identity_commitment: String,
}

/// A GraphQL `BigInt`, which the subgraph serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum BigIntValue {
    Text(String),
    Number(u64),
}

impl std::fmt::Display for BigIntValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BigIntValue::Text(s) => f.write_str(s),
            BigIntValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Response to a follow-up member page query.
#[derive(Debug, Deserialize)]
pub(crate) struct MemberPageData {
    pub groups: Vec<MemberPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MemberPage {
    #[serde(default)]
    pub members: Vec<MemberNode>,
}

impl From<GroupNode> for OnChainGroup {
    fn from(node: GroupNode) -> Self {
        Self {
            id: node.id,
            admin: node.admin.unwrap_or_default(),
            merkle_tree: node.merkle_tree,
            members: node
                .members
                .unwrap_or_default()
                .into_iter()
                .map(|m| m.identity_commitment)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetaData {
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Meta {
    pub block: MetaBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetaBlock {
    pub number: u64,
}
