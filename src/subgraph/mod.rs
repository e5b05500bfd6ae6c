//! On-chain group source.
//!
//! # Data Flow
//! ```text
//! Config (network name or explicit URL, failovers)
//!     → network.rs (network → hosted subgraph endpoint)
//!     → client.rs (GraphQL over HTTP with timeouts and failover)
//!     → types.rs (wire types → OnChainGroup)
//! ```
//!
//! # Constraints
//! - All requests have configurable timeouts
//! - Transport failures fail over; query errors do not
//! - A missing group is an error, an empty listing is not

pub mod client;
pub mod network;
pub mod types;

pub use client::SubgraphClient;
pub use network::SupportedNetwork;
pub use types::{GroupFilters, GroupOptions, MerkleTree, OnChainGroup, SubgraphError, SubgraphResult};
