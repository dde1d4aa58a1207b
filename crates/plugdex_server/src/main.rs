//! Plugdex server - HTTP entry point for the plugin catalog backend.

mod auth;
mod config;
mod error;
mod handlers;
mod server;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use plugdex::feed::FeedCache;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("plugdex=info,plugdex_server=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = config::Config::load();

    let database_url = config
        .database_url()
        .ok_or("Failed to determine database URL")?;

    // Ensure the database directory exists for SQLite
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        if let Some(parent) = std::path::Path::new(db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = plugdex::connect_and_migrate(&database_url).await?;

    let state = server::AppState {
        db,
        github_api_base: config.github.api_base.clone(),
        feed: Arc::new(FeedCache::new()),
        auth: auth::AuthConfig {
            bearer_token: config.server.bearer_token.clone(),
        },
    };

    server::start_server(&config.server, state).await?;

    Ok(())
}
