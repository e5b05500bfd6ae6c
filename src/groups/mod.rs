//! Group reconciliation.
//!
//! # Data Flow
//! ```text
//! caller (API handler, CLI)
//!     → service.rs (GroupService)
//!         → source.rs: OnChainGroupSource (subgraph)      [mandatory]
//!         → source.rs: OffchainGroupSource (off-chain API) [associated lookups only]
//!     → types.rs (Group, unified view) or None
//! ```
//!
//! # Constraints
//! - Members merge by concatenation: on-chain first, off-chain appended
//! - `name` is always derived from `id` by name.rs
//! - No group is produced without a successful on-chain fetch

pub mod name;
pub mod service;
pub mod source;
pub mod types;

pub use name::parse_group_name;
pub use service::GroupService;
pub use source::{OffchainGroupSource, OnChainGroupSource};
pub use types::{Group, GroupType, ReconcileError, ReconcileResult, FINGERPRINT_DURATION_SECS};
