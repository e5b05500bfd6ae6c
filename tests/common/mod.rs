//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: String,
    /// Path and query string.
    pub target: String,
    pub body: String,
}

impl MockRequest {
    /// The `query` field of a GraphQL POST body.
    pub fn graphql_query(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| v["query"].as_str().map(str::to_string))
            .unwrap_or_default()
    }
}

/// Start a programmable mock backend on an ephemeral port.
///
/// `handler` maps each request to a status code and JSON body.
pub async fn start_mock_backend<F>(handler: F) -> SocketAddr
where
    F: Fn(MockRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let handler = handler.clone();
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                let (status, body) = handler(request);
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line(status),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..end]).to_string();

    Some(MockRequest { method, target, body })
}

/// Subgraph `groups` response with one entry per `(id, admin, depth, members)`.
pub fn groups_response(groups: &[(&str, &str, u32, Vec<&str>)]) -> String {
    let groups: Vec<serde_json::Value> = groups
        .iter()
        .map(|(id, admin, depth, members)| {
            serde_json::json!({
                "id": id,
                "admin": admin,
                "merkleTree": { "depth": depth },
                "members": members
                    .iter()
                    .map(|m| serde_json::json!({ "identityCommitment": m }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    serde_json::json!({ "data": { "groups": groups } }).to_string()
}

/// Off-chain API response with one group per member list.
pub fn offchain_response(name: &str, member_lists: &[Vec<&str>]) -> String {
    let groups: Vec<serde_json::Value> = member_lists
        .iter()
        .map(|members| serde_json::json!({ "name": name, "type": "on-chain", "members": members }))
        .collect();
    serde_json::Value::Array(groups).to_string()
}

/// A group served by [`start_paging_subgraph`].
#[derive(Debug, Clone)]
pub struct IndexedGroup {
    pub id: String,
    pub admin: String,
    pub depth: u32,
    pub members: Vec<String>,
}

impl IndexedGroup {
    pub fn new(id: &str, admin: &str, depth: u32, members: Vec<String>) -> Self {
        Self {
            id: id.to_string(),
            admin: admin.to_string(),
            depth,
            members,
        }
    }
}

/// Subgraph mock that pages list fields the way a hosted subgraph does:
/// `first` defaults to 100 and is capped at 1000, groups are ordered by id
/// with an `id_gt` cursor, and members by index with an `index_gt` cursor.
///
/// Returns the address and the number of queries served so far.
pub async fn start_paging_subgraph(groups: Vec<IndexedGroup>) -> (SocketAddr, Arc<AtomicUsize>) {
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = requests.clone();
    let mut groups = groups;
    groups.sort_by(|a, b| a.id.cmp(&b.id));

    let addr = start_mock_backend(move |req| {
        counter.fetch_add(1, Ordering::SeqCst);
        let query = req.graphql_query();
        let (group_args, member_args) = match query.split_once("members(") {
            Some((groups, members)) => (groups, Some(members)),
            None => (query.as_str(), None),
        };

        let id = quoted_arg(group_args, "id");
        let admin = quoted_arg(group_args, "admin");
        let after_id = quoted_arg(group_args, "id_gt");

        let nodes: Vec<serde_json::Value> = groups
            .iter()
            .filter(|g| id.as_ref().map_or(true, |id| &g.id == id))
            .filter(|g| admin.as_ref().map_or(true, |admin| &g.admin == admin))
            .filter(|g| after_id.as_ref().map_or(true, |after| g.id > *after))
            .take(page_size(group_args))
            .map(|g| {
                let mut node = serde_json::json!({
                    "id": g.id,
                    "admin": g.admin,
                    "merkleTree": { "depth": g.depth },
                });
                if let Some(args) = member_args {
                    let start = quoted_arg(args, "index_gt")
                        .and_then(|i| i.parse::<usize>().ok())
                        .map_or(0, |i| i + 1);
                    let members: Vec<serde_json::Value> = g
                        .members
                        .iter()
                        .enumerate()
                        .skip(start)
                        .take(page_size(args))
                        .map(|(i, m)| serde_json::json!({ "index": i.to_string(), "identityCommitment": m }))
                        .collect();
                    node["members"] = serde_json::Value::Array(members);
                }
                node
            })
            .collect();

        (200, serde_json::json!({ "data": { "groups": nodes } }).to_string())
    })
    .await;

    (addr, requests)
}

/// Value of a `key: "value"` argument.
fn quoted_arg(query: &str, key: &str) -> Option<String> {
    let pattern = format!("{key}: \"");
    let start = query.find(&pattern)? + pattern.len();
    let end = query[start..].find('"')?;
    Some(query[start..start + end].to_string())
}

/// The `first:` argument, with the hosted subgraph's default and cap.
fn page_size(args: &str) -> usize {
    args.find("first: ")
        .map(|i| &args[i + "first: ".len()..])
        .and_then(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        })
        .unwrap_or(100)
        .min(1000)
}
