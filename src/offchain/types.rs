use serde::Deserialize;
use thiserror::Error;

pub use crate::config::schema::OffchainConfig;

/// A group maintained in the off-chain store.
///
/// Only `members` takes part in reconciliation; other fields returned by
/// the API are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct OffchainGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Error)]
pub enum OffchainError {
    #[error("off-chain API request failed: {0}")]
    RequestFailed(String),

    #[error("off-chain API returned HTTP {0}")]
    Http(u16),

    #[error("invalid response from off-chain API: {0}")]
    InvalidResponse(String),

    #[error("off-chain API unreachable: {0}")]
    Unreachable(String),

    #[error("invalid off-chain API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type OffchainResult<T> = Result<T, OffchainError>;
