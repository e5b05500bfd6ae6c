//! Read API handlers.
//!
//! A `None` from the service means the sources could not be read; it maps
//! to 502 so clients can tell it apart from an empty listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub admin: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    /// Subgraph probe result; `None` when no probe is configured.
    pub subgraph: Option<bool>,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

fn unavailable(what: &str) -> Response {
    error(StatusCode::BAD_GATEWAY, format!("could not load {what}"))
}

/// `GET /groups?admin=<address>`
pub async fn list_groups(State(state): State<AppState>, Query(query): Query<AdminQuery>) -> Response {
    let Some(admin) = query.admin.filter(|a| !a.trim().is_empty()) else {
        return error(StatusCode::BAD_REQUEST, "missing 'admin' query parameter");
    };

    match state.service.list_groups_by_admin(&admin).await {
        Some(groups) => Json(groups).into_response(),
        None => unavailable("groups"),
    }
}

/// `GET /groups/{id}`
pub async fn get_group(State(state): State<AppState>, Path(group_id): Path<String>) -> Response {
    match state.service.get_group(&group_id).await {
        Some(group) => Json(group).into_response(),
        None => unavailable("group"),
    }
}

/// `GET /groups/{id}/associated`
pub async fn get_associated_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Response {
    match state.service.get_associated_group(&group_id).await {
        Some(group) => Json(group).into_response(),
        None => unavailable("associated group"),
    }
}

/// `GET /health`
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    let subgraph = match &state.subgraph {
        Some(client) => Some(client.is_healthy().await),
        None => None,
    };

    Json(HealthStatus {
        status: if subgraph == Some(false) { "degraded" } else { "operational" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        subgraph,
    })
}
