//! Sync gatekeeper: loads the token and plugin, enforces the daily gate.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::github::GitHubClient;
use crate::store;

use super::error::SyncError;
use super::syncer::PluginSyncer;

/// Minimum time between two syncs of the same plugin.
pub const SYNC_COOLDOWN_HOURS: i64 = 24;

/// Commit-scan window for a plugin that has never been synced.
pub const FIRST_SYNC_WINDOW_DAYS: i64 = 7;

/// Whether a full cooldown has elapsed since `last_synced_at`.
pub(crate) fn cooldown_elapsed(last_synced_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(last_synced_at) >= Duration::hours(SYNC_COOLDOWN_HOURS)
}

/// One week before now.
pub(crate) fn one_week_ago() -> DateTime<Utc> {
    Utc::now() - Duration::days(FIRST_SYNC_WINDOW_DAYS)
}

/// Build a syncer for a plugin on behalf of a user.
///
/// Loads the user's stored GitHub token and the current plugin record
/// (with its config count). Fails with [`SyncError::SyncedTooRecently`]
/// when the plugin was synced within the last 24 hours - before any work
/// starts and with no side effects. Token and plugin lookup failures
/// propagate as store errors.
///
/// The gate check is advisory; the race between two concurrent calls that
/// both pass it is closed by the conditional update at persist time.
///
/// `github_api_base` is normally [`crate::github::GITHUB_API_BASE`].
pub async fn plugin_syncer(
    db: &DatabaseConnection,
    github_api_base: &str,
    user_id: Uuid,
    owner: &str,
    name: &str,
) -> Result<PluginSyncer, SyncError> {
    let token = store::users::github_token(db, user_id).await?;
    let plugin = store::plugins::find_with_count(db, owner, name).await?;

    if let Some(last_synced_at) = plugin.plugin.last_synced_at
        && !cooldown_elapsed(last_synced_at.with_timezone(&Utc), Utc::now())
    {
        return Err(SyncError::SyncedTooRecently {
            owner: owner.to_string(),
            name: name.to_string(),
        });
    }

    let github = GitHubClient::with_api_base(&token, github_api_base);
    Ok(PluginSyncer::new(db.clone(), github, plugin))
}
