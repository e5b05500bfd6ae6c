//! Identity group gateway.
//!
//! Reads Semaphore groups from the on-chain subgraph and merges in the
//! membership of same-named off-chain groups.

pub mod config;
pub mod groups;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod offchain;
pub mod subgraph;

pub use config::schema::GatewayConfig;
pub use groups::{Group, GroupService};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
