//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the group gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration for the read API.
    pub listener: ListenerConfig,

    /// On-chain subgraph settings.
    pub subgraph: SubgraphConfig,

    /// Off-chain group API settings.
    pub offchain: OffchainConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Subgraph (on-chain source) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubgraphConfig {
    /// Ethereum network the Semaphore contracts are deployed on.
    pub network: String,

    /// Explicit GraphQL endpoint. Takes precedence over `network`.
    pub url: Option<String>,

    /// Failover GraphQL endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            network: "sepolia".to_string(),
            url: None,
            failover_urls: Vec::new(),
            timeout_secs: 10,
        }
    }
}

/// Off-chain group API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OffchainConfig {
    /// Base URL of the off-chain group API.
    pub api_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OffchainConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Timeout configuration for the read API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
