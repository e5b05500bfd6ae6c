//! End-to-end tests of the read API.

use std::net::SocketAddr;
use std::time::Duration;

use group_reconciler::config::GatewayConfig;
use group_reconciler::http::handlers::{ErrorBody, HealthStatus};
use group_reconciler::http::HttpServer;
use group_reconciler::lifecycle::{build_state, Shutdown};
use group_reconciler::Group;
use reqwest::StatusCode;

mod common;
use common::{groups_response, offchain_response, start_mock_backend};

struct TestServer {
    base: String,
    shutdown: Shutdown,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

async fn start_server(subgraph: SocketAddr, offchain: SocketAddr) -> TestServer {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.subgraph.url = Some(format!("http://{}/subgraphs/name/semaphore", subgraph));
    config.subgraph.timeout_secs = 5;
    config.offchain.api_url = format!("http://{}", offchain);
    config.observability.metrics_enabled = false;

    let state = build_state(&config).unwrap();
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, state);
    let listener_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, listener_shutdown).await;
    });

    TestServer {
        base: format!("http://{}", addr),
        shutdown,
    }
}

async fn default_backends() -> (SocketAddr, SocketAddr) {
    let subgraph = start_mock_backend(|req| {
        let query = req.graphql_query();
        if query.contains("_meta") {
            (200, r#"{"data":{"_meta":{"block":{"number":9}}}}"#.to_string())
        } else if query.contains(r#"id: "42""#) {
            (200, groups_response(&[("42", "0xA", 3, vec!["u1", "u2"])]))
        } else if query.contains(r#"admin: "0xA""#) {
            (
                200,
                groups_response(&[("42", "0xA", 3, vec!["u1", "u2"]), ("43", "0xA", 16, vec![])]),
            )
        } else {
            (200, groups_response(&[]))
        }
    })
    .await;
    let offchain = start_mock_backend(|req| {
        if req.target.starts_with("/groups?name=42") {
            (200, offchain_response("42", &[vec!["u3"], vec!["u4"]]))
        } else {
            (404, String::new())
        }
    })
    .await;
    (subgraph, offchain)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_groups_endpoint() {
    let (subgraph, offchain) = default_backends().await;
    let server = start_server(subgraph, offchain).await;

    let res = client()
        .get(format!("{}/groups?admin=0xA", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));

    let body: serde_json::Value = res.json().await.unwrap();
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["treeDepth"], 3);
    assert_eq!(groups[0]["type"], "on-chain");
    assert!(groups[0].get("fingerprintDuration").is_none());

    let res = client()
        .get(format!("{}/groups?admin=0xB", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let groups: Vec<Group> = res.json().await.unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_list_groups_requires_admin() {
    let (subgraph, offchain) = default_backends().await;
    let server = start_server(subgraph, offchain).await;

    for url in [
        format!("{}/groups", server.base),
        format!("{}/groups?admin=", server.base),
    ] {
        let res = client().get(url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = res.json().await.unwrap();
        assert!(body.error.contains("admin"));
    }
}

#[tokio::test]
async fn test_get_group_endpoint() {
    let (subgraph, offchain) = default_backends().await;
    let server = start_server(subgraph, offchain).await;

    let res = client()
        .get(format!("{}/groups/42", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let group: Group = res.json().await.unwrap();
    assert_eq!(group.fingerprint_duration, Some(3600));
    assert_eq!(group.members, vec!["u1", "u2"]);

    let res = client()
        .get(format!("{}/groups/7", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_associated_group_endpoint() {
    let (subgraph, offchain) = default_backends().await;
    let server = start_server(subgraph, offchain).await;

    let res = client()
        .get(format!("{}/groups/42/associated", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let group: Group = res.json().await.unwrap();
    // Only the first off-chain match is merged.
    assert_eq!(group.members, vec!["u1", "u2", "u3"]);
    assert_eq!(group.fingerprint_duration, Some(3600));
}

#[tokio::test]
async fn test_failing_subgraph_maps_to_bad_gateway() {
    let subgraph = start_mock_backend(|_| (500, String::new())).await;
    let offchain = start_mock_backend(|_| (404, String::new())).await;
    let server = start_server(subgraph, offchain).await;

    for path in ["/groups?admin=0xA", "/groups/42", "/groups/42/associated"] {
        let res = client()
            .get(format!("{}{}", server.base, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY, "path {}", path);
    }

    let res = client()
        .get(format!("{}/health", server.base))
        .send()
        .await
        .unwrap();
    let health: HealthStatus = res.json().await.unwrap();
    assert_eq!(health.status, "degraded");
    assert_eq!(health.subgraph, Some(false));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (subgraph, offchain) = default_backends().await;
    let server = start_server(subgraph, offchain).await;

    let res = client()
        .get(format!("{}/health", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let health: HealthStatus = res.json().await.unwrap();
    assert_eq!(health.status, "operational");
    assert_eq!(health.subgraph, Some(true));
}
