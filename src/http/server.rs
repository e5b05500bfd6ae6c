//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the read API handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve until the shutdown signal fires

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::groups::GroupService;
use crate::http::handlers;
use crate::lifecycle::ShutdownListener;
use crate::subgraph::SubgraphClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GroupService>,
    /// Used by `/health` to probe the subgraph.
    pub subgraph: Option<SubgraphClient>,
}

impl AppState {
    pub fn new(service: GroupService, subgraph: Option<SubgraphClient>) -> Self {
        Self {
            service: Arc::new(service),
            subgraph,
        }
    }
}

/// HTTP server exposing the group read API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &GatewayConfig, state: AppState) -> Self {
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/groups", get(handlers::list_groups))
            .route("/groups/{id}", get(handlers::get_group))
            .route("/groups/{id}/associated", get(handlers::get_associated_group))
            .route("/health", get(handlers::get_health))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("HTTP server shutting down");
            })
            .await
    }
}
