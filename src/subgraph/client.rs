//! Subgraph GraphQL client with timeout and failover handling.
//!
//! # Responsibilities
//! - Resolve the GraphQL endpoint from the configured network or URL
//! - Query indexed groups (by id, or filtered by admin)
//! - Fail over to secondary endpoints on transport errors
//! - Provide health check for subgraph connectivity

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use url::Url;

use crate::groups::source::OnChainGroupSource;
use crate::observability::metrics;
use crate::subgraph::network::SupportedNetwork;
use crate::subgraph::types::{
    GraphQlResponse, GroupNode, GroupOptions, GroupsData, MemberPageData, MetaData, OnChainGroup,
    SubgraphConfig, SubgraphError, SubgraphResult,
};

const SOURCE: &str = "subgraph";

/// Items requested per list field. The subgraph serves at most 1000 per
/// request, and only 100 when `first` is omitted.
const PAGE_SIZE: usize = 1000;

/// Semaphore subgraph client with failover support.
#[derive(Clone)]
pub struct SubgraphClient {
    /// Endpoints in priority order (primary first).
    endpoints: Vec<Url>,
    /// HTTP client (reusable connection pool).
    http: reqwest::Client,
    /// Configuration.
    config: SubgraphConfig,
}

impl SubgraphClient {
    /// Create a new subgraph client.
    ///
    /// No request is made here; an unreachable subgraph only surfaces on
    /// the first query.
    pub fn new(config: SubgraphConfig) -> SubgraphResult<Self> {
        let mut endpoints = Vec::new();

        // 1. Primary endpoint
        let primary = resolve_endpoint(&config)?;
        endpoints.push(parse_url(&primary)?);

        // 2. Failover endpoints
        for url_str in &config.failover_urls {
            match Url::parse(url_str) {
                Ok(url) => endpoints.push(url),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover subgraph URL"),
            }
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SubgraphError::Transport(e.to_string()))?;

        tracing::info!(
            endpoint = %endpoints[0],
            failovers = endpoints.len() - 1,
            network = %config.network,
            "Subgraph client initialized"
        );

        Ok(Self {
            endpoints,
            http,
            config,
        })
    }

    /// Fetch all groups matching `options.filters`, following pages until
    /// a short one comes back.
    pub async fn get_groups(&self, options: &GroupOptions) -> SubgraphResult<Vec<OnChainGroup>> {
        let admin = options
            .filters
            .admin
            .as_deref()
            .map(|admin| format!("admin: \"{}\"", escape(admin)));
        let mut groups: Vec<OnChainGroup> = Vec::new();

        loop {
            let cursor = groups.last().map(|g| format!("id_gt: \"{}\"", escape(&g.id)));
            let filters: Vec<&str> = admin.iter().chain(cursor.iter()).map(String::as_str).collect();

            let data: GroupsData = self.query(&groups_query(&filters, options.members)).await?;
            let page_len = data.groups.len();
            for node in data.groups {
                groups.push(self.with_all_members(node).await?);
            }

            if page_len < PAGE_SIZE {
                return Ok(groups);
            }
        }
    }

    /// Fetch a single group by id.
    pub async fn get_group(&self, group_id: &str, options: &GroupOptions) -> SubgraphResult<OnChainGroup> {
        let filter = format!("id: \"{}\"", escape(group_id));

        let data: GroupsData = self.query(&groups_query(&[filter.as_str()], options.members)).await?;
        let node = data
            .groups
            .into_iter()
            .next()
            .ok_or_else(|| SubgraphError::GroupNotFound(group_id.to_string()))?;
        self.with_all_members(node).await
    }

    /// Get the latest block indexed by the subgraph.
    pub async fn get_block_number(&self) -> SubgraphResult<u64> {
        let data: MetaData = self.query("{ _meta { block { number } } }").await?;
        Ok(data.meta.block.number)
    }

    /// Check if the subgraph is reachable and indexing.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.get_block_number().await.is_ok();
        metrics::record_source_health(SOURCE, healthy);
        healthy
    }

    /// Get the configured endpoints, primary first.
    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    /// Page through the members of `node` past its first page.
    async fn with_all_members(&self, mut node: GroupNode) -> SubgraphResult<OnChainGroup> {
        if let Some(members) = node.members.as_mut() {
            let mut page_len = members.len();
            while page_len >= PAGE_SIZE {
                let after = members
                    .last()
                    .and_then(|m| m.index.clone())
                    .ok_or_else(|| SubgraphError::InvalidResponse("member index missing".to_string()))?;

                let data: MemberPageData = self
                    .query(&member_page_query(&node.id, &after.to_string()))
                    .await?;
                let page = data
                    .groups
                    .into_iter()
                    .next()
                    .map(|g| g.members)
                    .unwrap_or_default();

                page_len = page.len();
                members.extend(page);
            }
        }
        Ok(OnChainGroup::from(node))
    }

    /// Run a query against each endpoint until one answers.
    async fn query<T: DeserializeOwned>(&self, query: &str) -> SubgraphResult<T> {
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            let started = Instant::now();
            let result = self.query_endpoint(endpoint, query).await;
            metrics::record_source_request(SOURCE, outcome(&result), started.elapsed());

            match result {
                Err(e) if e.is_failover() => {
                    tracing::warn!(endpoint_idx = i, error = %e, "Subgraph error, trying next endpoint");
                }
                other => return other,
            }
        }
        Err(SubgraphError::AllEndpointsFailed)
    }

    async fn query_endpoint<T: DeserializeOwned>(&self, endpoint: &Url, query: &str) -> SubgraphResult<T> {
        let response = self
            .http
            .post(endpoint.clone())
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SubgraphError::Transport(format!("request timed out: {e}"))
                } else {
                    SubgraphError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubgraphError::Http(status.as_u16()));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| SubgraphError::InvalidResponse(e.to_string()))?;

        if let Some(first) = body.errors.into_iter().next() {
            return Err(SubgraphError::Query(first.message));
        }

        body.data
            .ok_or_else(|| SubgraphError::InvalidResponse("missing data field".to_string()))
    }
}

impl std::fmt::Debug for SubgraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubgraphClient")
            .field("endpoints", &self.endpoints)
            .field("network", &self.config.network)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}

#[async_trait]
impl OnChainGroupSource for SubgraphClient {
    async fn get_groups(&self, options: &GroupOptions) -> SubgraphResult<Vec<OnChainGroup>> {
        SubgraphClient::get_groups(self, options).await
    }

    async fn get_group(&self, group_id: &str, options: &GroupOptions) -> SubgraphResult<OnChainGroup> {
        SubgraphClient::get_group(self, group_id, options).await
    }
}

/// Resolve the primary endpoint: an explicit URL wins over the network name.
pub fn resolve_endpoint(config: &SubgraphConfig) -> SubgraphResult<String> {
    match &config.url {
        Some(url) => Ok(url.clone()),
        None => Ok(config.network.parse::<SupportedNetwork>()?.subgraph_url()),
    }
}

fn parse_url(url: &str) -> SubgraphResult<Url> {
    Url::parse(url).map_err(|e| SubgraphError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn outcome<T>(result: &SubgraphResult<T>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(SubgraphError::GroupNotFound(_)) => "not_found",
        Err(_) => "error",
    }
}

/// Build a page of the `groups` query, ordered by id.
fn groups_query(filters: &[&str], members: bool) -> String {
    let filter = if filters.is_empty() {
        String::new()
    } else {
        format!(", where: {{ {} }}", filters.join(", "))
    };
    let members = if members {
        format!(" members(first: {PAGE_SIZE}, orderBy: index) {{ index identityCommitment }}")
    } else {
        String::new()
    };
    format!("{{ groups(first: {PAGE_SIZE}, orderBy: id{filter}) {{ id merkleTree {{ depth }} admin{members} }} }}")
}

/// Build the query for the members of one group after leaf index `after`.
fn member_page_query(group_id: &str, after: &str) -> String {
    format!(
        "{{ groups(where: {{ id: \"{}\" }}) {{ members(first: {PAGE_SIZE}, orderBy: index, where: {{ index_gt: \"{}\" }}) {{ index identityCommitment }} }} }}",
        escape(group_id),
        escape(after)
    )
}

/// Escape a value interpolated into a GraphQL string literal.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}
