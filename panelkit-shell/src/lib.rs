//! HTTP API for the panelkit shell.
//!
//! Every handler builds a [`RequestContext`] from the request, so the
//! visibility callbacks see the same user, path and query the SPA sent.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::{Router, routing::get};
use panelkit_host::model::{RequestContext, User};
use panelkit_host::{InertiaPage, Panel, PanelError, SharedProps};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Header carrying the authenticated user id.
pub const USER_HEADER: &str = "x-panel-user";
/// Header carrying the user's abilities, comma-separated.
pub const ABILITIES_HEADER: &str = "x-panel-abilities";

/// Maps panel errors onto HTTP statuses.
pub struct ApiError(PanelError);

impl From<PanelError> for ApiError {
    fn from(e: PanelError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PanelError::NotFound { .. } => StatusCode::NOT_FOUND,
            PanelError::Forbidden { .. } => StatusCode::FORBIDDEN,
            e => {
                warn!(error = %e, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Builds the context visibility callbacks are evaluated against.
pub fn request_context(headers: &HeaderMap, uri: &Uri, query: BTreeMap<String, String>) -> RequestContext {
    let user = headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            let abilities = headers
                .get(ABILITIES_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty());
            User::new(id).with_abilities(abilities)
        });

    let mut ctx = match user {
        Some(user) => RequestContext::for_user(user, uri.path()),
        None => RequestContext::guest(uri.path()),
    };
    ctx.query = query;
    ctx
}

async fn props_handler(
    State(panel): State<Arc<Panel>>,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<BTreeMap<String, String>>,
) -> Json<SharedProps> {
    let ctx = request_context(&headers, &uri, query);
    Json(panel.shared_props(&ctx))
}

async fn page_handler(
    State(panel): State<Arc<Panel>>,
    Path(key): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<InertiaPage>, ApiError> {
    let ctx = request_context(&headers, &uri, query);
    Ok(Json(panel.page_response(&key, &ctx)?))
}

async fn dashboard_handler(
    State(panel): State<Arc<Panel>>,
    Path(key): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<InertiaPage>, ApiError> {
    let ctx = request_context(&headers, &uri, query);
    Ok(Json(panel.dashboard_response(&key, &ctx)?))
}

/// Build the HTTP API router around a booted panel.
pub fn build_router(panel: Arc<Panel>) -> Router {
    Router::new()
        .route("/api/v1/props", get(props_handler))
        .route("/api/v1/pages/{key}", get(page_handler))
        .route("/api/v1/dashboards/{key}", get(dashboard_handler))
        .with_state(panel)
}
