//! HTTP request handlers for the plugdex API.
//!
//! Handles GET /health, GET /neovim/plugins/rss.xml, and
//! POST /api/plugins/{owner}/{name}/sync.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use plugdex::entity::plugin::PluginWithCount;
use plugdex::sync;

use crate::error::ApiError;
use crate::server::AppState;

/// Cache directive for the feed: revalidate at the browser, one day at
/// intermediaries.
const FEED_CACHE_CONTROL: &str = "public, max-age=0, s-maxage=86400";

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
}

/// GET /health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /neovim/plugins/rss.xml
///
/// Serves the cached plugin feed. The document is re-rendered server-side
/// at most once a day; the Cache-Control header tells intermediaries to
/// hold it just as long.
pub async fn get_plugin_feed(State(state): State<AppState>) -> Result<Response, ApiError> {
    let feed = state.feed.get_or_render(&state.db).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/rss+xml"),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        feed.to_string(),
    )
        .into_response())
}

/// POST /api/plugins/{owner}/{name}/sync
///
/// Runs the gatekeeper and, when it passes, the full sync on behalf of
/// the user named by the `x-user-id` header. Returns the refreshed plugin
/// merged with its config count.
pub async fn post_sync_plugin(
    State(state): State<AppState>,
    Path((owner, name)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<PluginWithCount>, ApiError> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or(ApiError::MissingUser)?;

    let syncer =
        sync::plugin_syncer(&state.db, &state.github_api_base, user_id, &owner, &name).await?;
    let synced = syncer.sync().await?;

    tracing::info!(plugin = %synced.plugin.full_name(), stars = synced.plugin.stars, "plugin synced");
    Ok(Json(synced))
}
