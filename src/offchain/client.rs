//! HTTP client for the off-chain group API.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use url::Url;

use crate::groups::source::OffchainGroupSource;
use crate::observability::metrics;
use crate::offchain::types::{OffchainConfig, OffchainError, OffchainGroup, OffchainResult};

const SOURCE: &str = "offchain";

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for looking up off-chain groups.
///
/// Sends `GET {api_url}/groups?name={name}&type={type}` and parses the
/// returned array.
#[derive(Clone)]
pub struct OffchainClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    groups_url: Url,
}

impl OffchainClient {
    pub fn new(config: &OffchainConfig) -> OffchainResult<Self> {
        let invalid = |reason: String| OffchainError::InvalidUrl {
            url: config.api_url.clone(),
            reason,
        };
        let base = Url::parse(&config.api_url).map_err(|e| invalid(e.to_string()))?;
        let groups_url = join_groups(&base).map_err(|e| invalid(e.to_string()))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| OffchainError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http_client,
            groups_url,
        })
    }

    /// Endpoint queried for group lookups.
    pub fn groups_url(&self) -> &Url {
        &self.groups_url
    }

    /// Look up groups by name and type.
    ///
    /// A 404 is treated as "no such group" and yields an empty vector.
    pub async fn get_group_by_name(
        &self,
        name: &str,
        group_type: &str,
    ) -> OffchainResult<Vec<OffchainGroup>> {
        let started = Instant::now();
        let result = self.fetch(name, group_type).await;
        let outcome = match &result {
            Ok(groups) if groups.is_empty() => "not_found",
            Ok(_) => "success",
            Err(_) => "error",
        };
        metrics::record_source_request(SOURCE, outcome, started.elapsed());
        result
    }

    async fn fetch(&self, name: &str, group_type: &str) -> OffchainResult<Vec<OffchainGroup>> {
        let response = self
            .http_client
            .get(self.groups_url.clone())
            .query(&[("name", name), ("type", group_type)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OffchainError::Unreachable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    OffchainError::Unreachable(format!("connection failed: {e}"))
                } else {
                    OffchainError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(OffchainError::Http(status.as_u16()));
        }

        response
            .json::<Vec<OffchainGroup>>()
            .await
            .map_err(|e| OffchainError::InvalidResponse(format!("failed to parse groups: {e}")))
    }
}

#[async_trait]
impl OffchainGroupSource for OffchainClient {
    async fn get_group_by_name(
        &self,
        name: &str,
        group_type: &str,
    ) -> OffchainResult<Vec<OffchainGroup>> {
        OffchainClient::get_group_by_name(self, name, group_type).await
    }
}

impl std::fmt::Debug for OffchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffchainClient")
            .field("groups_url", &self.groups_url.as_str())
            .finish()
    }
}

/// `{base}/groups`, keeping any path prefix of `base`.
fn join_groups(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("groups")
}
