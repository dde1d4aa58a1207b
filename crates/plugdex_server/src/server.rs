//! Plugdex HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;

use plugdex::feed::FeedCache;

use crate::auth::{AuthConfig, auth_middleware};
use crate::config::ServerConfig;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: DatabaseConnection,
    /// GitHub API base URL syncs run against.
    pub github_api_base: String,
    /// Cached plugin feed.
    pub feed: Arc<FeedCache>,
    /// Authentication configuration.
    pub auth: AuthConfig,
}

/// Build the application router.
///
/// - GET /health and GET /neovim/plugins/rss.xml are public.
/// - POST /api/plugins/{owner}/{name}/sync sits behind bearer auth.
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/neovim/plugins/rss.xml", get(handlers::get_plugin_feed))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route(
            "/api/plugins/{owner}/{name}/sync",
            post(handlers::post_sync_plugin),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
}

/// Bind the configured address and serve until shutdown.
pub async fn start_server(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("plugdex server listening on {addr}");

    axum::serve(listener, app(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::{Duration, Utc};
    use sea_orm::Set;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use plugdex::entity::plugin::ActiveModel as PluginActiveModel;
    use plugdex::store;

    async fn test_state(github_api_base: &str, bearer_token: Option<&str>) -> AppState {
        let db = plugdex::connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        AppState {
            db,
            github_api_base: github_api_base.to_string(),
            feed: Arc::new(FeedCache::new()),
            auth: AuthConfig {
                bearer_token: bearer_token.map(String::from),
            },
        }
    }

    async fn seed_catalog(state: &AppState, last_synced_hours_ago: Option<i64>) -> Uuid {
        let user = store::users::upsert(&state.db, 7, "tester", Some("gh-token"))
            .await
            .expect("user should insert");

        let model = PluginActiveModel {
            id: Set(Uuid::new_v4()),
            owner: Set("acme".to_string()),
            name: Set("plugin.nvim".to_string()),
            source: Set("awesome-list".to_string()),
            category: Set("editing".to_string()),
            link: Set("https://github.com/acme/plugin.nvim".to_string()),
            short_description: Set("A plugin".to_string()),
            readme: Set(String::new()),
            stars: Set(1),
            created_at: Set(Utc::now().fixed_offset()),
            last_synced_at: Set(
                last_synced_hours_ago.map(|h| (Utc::now() - Duration::hours(h)).fixed_offset())
            ),
        };
        store::plugins::insert(&state.db, model)
            .await
            .expect("plugin should insert");

        user.id
    }

    fn sync_request(user_id: Uuid, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/plugins/acme/plugin.nvim/sync")
            .header("x-user-id", user_id.to_string());
        if let Some(token) = bearer {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        builder.body(Body::empty()).expect("request should build")
    }

    #[tokio::test]
    async fn feed_route_serves_rss_with_cache_headers() {
        let state = test_state("http://unused.invalid", None).await;
        seed_catalog(&state, None).await;

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/neovim/plugins/rss.xml")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/rss+xml"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=0, s-maxage=86400"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let text = String::from_utf8(body.to_vec()).expect("body should be utf-8");
        assert!(text.contains("<rss"));
        assert!(text.contains("acme/plugin.nvim"));
    }

    #[tokio::test]
    async fn sync_route_requires_bearer_token_when_configured() {
        let state = test_state("http://unused.invalid", Some("secret")).await;
        let user_id = seed_catalog(&state, None).await;
        let router = app(state);

        let unauthorized = router
            .clone()
            .oneshot(sync_request(user_id, None))
            .await
            .expect("request should complete");
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let wrong_token = router
            .oneshot(sync_request(user_id, Some("wrong")))
            .await
            .expect("request should complete");
        assert_eq!(wrong_token.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn sync_route_rejects_recent_sync_with_forbidden() {
        let state = test_state("http://unused.invalid", None).await;
        let user_id = seed_catalog(&state, Some(1)).await;

        let response = app(state)
            .oneshot(sync_request(user_id, None))
            .await
            .expect("request should complete");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn sync_route_requires_user_header() {
        let state = test_state("http://unused.invalid", None).await;
        seed_catalog(&state, None).await;

        let response = app(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/plugins/acme/plugin.nvim/sync")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("request should complete");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn sync_route_runs_full_sync() {
        let github = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/acme/plugin.nvim"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stargazers_count": 321, "description": "Synced"
            })))
            .mount(&github)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/plugin.nvim/readme"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# readme"))
            .mount(&github)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/plugin.nvim/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&github)
            .await;

        let state = test_state(&github.uri(), Some("secret")).await;
        let user_id = seed_catalog(&state, None).await;
        let db = state.db.clone();

        let response = app(state)
            .oneshot(sync_request(user_id, Some("secret")))
            .await
            .expect("request should complete");

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let synced: serde_json::Value =
            serde_json::from_slice(&body).expect("body should be JSON");
        assert_eq!(synced["stars"], 321);
        assert_eq!(synced["short_description"], "Synced");
        assert_eq!(synced["config_count"], 0);

        let stored = store::plugins::find_by_natural_key(&db, "acme", "plugin.nvim")
            .await
            .expect("lookup should succeed")
            .expect("plugin should exist");
        assert_eq!(stored.stars, 321);
        assert!(stored.last_synced_at.is_some());
    }
}
