//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and value ranges
//! - Check the subgraph endpoint can be resolved
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::subgraph::network::SupportedNetwork;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    match &config.subgraph.url {
        Some(url) => check_url(&mut errors, "subgraph.url", url),
        None => {
            if config.subgraph.network.parse::<SupportedNetwork>().is_err() {
                let known: Vec<&str> = SupportedNetwork::ALL.iter().map(|n| n.as_str()).collect();
                errors.push(ValidationError::new(
                    "subgraph.network",
                    format!(
                        "unsupported network '{}' (expected one of: {})",
                        config.subgraph.network,
                        known.join(", ")
                    ),
                ));
            }
        }
    }

    for url in &config.subgraph.failover_urls {
        check_url(&mut errors, "subgraph.failover_urls", url);
    }
    check_url(&mut errors, "offchain.api_url", &config.offchain.api_url);

    if config.subgraph.timeout_secs == 0 {
        errors.push(ValidationError::new("subgraph.timeout_secs", "must be greater than 0"));
    }
    if config.offchain.timeout_secs == 0 {
        errors.push(ValidationError::new("offchain.timeout_secs", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, url: &str) {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}' in '{}'", parsed.scheme(), url),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", url, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nowhere".to_string();
        config.subgraph.network = "homestead".to_string();
        config.offchain.api_url = "ftp://files.example.org".to_string();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "subgraph.network",
                "offchain.api_url",
                "timeouts.request_secs",
                "observability.log_level",
            ]
        );
    }

    #[test]
    fn test_explicit_url_skips_network_check() {
        let mut config = GatewayConfig::default();
        config.subgraph.network = "anything".to_string();
        config.subgraph.url = Some("http://localhost:8000/subgraphs/name/semaphore".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_enabled = false;
        config.observability.metrics_address = "bogus".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("subgraph.timeout_secs", "must be greater than 0");
        assert_eq!(err.to_string(), "subgraph.timeout_secs: must be greater than 0");
    }
}
