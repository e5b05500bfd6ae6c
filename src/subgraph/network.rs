//! Supported networks and their hosted subgraph endpoints.

use std::fmt;
use std::str::FromStr;

use crate::subgraph::types::SubgraphError;

/// Base URL of the hosted Semaphore subgraphs.
const STUDIO_BASE_URL: &str = "https://api.studio.thegraph.com/query/14377";

/// Deployed subgraph version.
const SUBGRAPH_VERSION: &str = "v3.6.1";

/// Networks with a hosted Semaphore subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedNetwork {
    Sepolia,
    Arbitrum,
    ArbitrumSepolia,
    Mumbai,
    OptimismSepolia,
}

impl SupportedNetwork {
    pub const ALL: [SupportedNetwork; 5] = [
        SupportedNetwork::Sepolia,
        SupportedNetwork::Arbitrum,
        SupportedNetwork::ArbitrumSepolia,
        SupportedNetwork::Mumbai,
        SupportedNetwork::OptimismSepolia,
    ];

    /// Network name as used in configuration and subgraph slugs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedNetwork::Sepolia => "sepolia",
            SupportedNetwork::Arbitrum => "arbitrum",
            SupportedNetwork::ArbitrumSepolia => "arbitrum-sepolia",
            SupportedNetwork::Mumbai => "mumbai",
            SupportedNetwork::OptimismSepolia => "optimism-sepolia",
        }
    }

    /// Hosted GraphQL endpoint for this network.
    pub fn subgraph_url(&self) -> String {
        format!("{}/semaphore-{}/{}", STUDIO_BASE_URL, self.as_str(), SUBGRAPH_VERSION)
    }
}

impl fmt::Display for SupportedNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedNetwork {
    type Err = SubgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| SubgraphError::UnsupportedNetwork(s.to_string()))
    }
}
