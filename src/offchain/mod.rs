//! Off-chain group source.
//!
//! Groups kept in the relational store are reachable through an HTTP API
//! addressed by name and type. A lookup that matches nothing is an empty
//! result, never an error.

pub mod client;
pub mod types;

pub use client::OffchainClient;
pub use types::{OffchainError, OffchainGroup, OffchainResult};
