//! The plugin sync orchestration.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use sea_orm::DatabaseConnection;

use crate::entity::plugin::{Model as PluginModel, PluginWithCount};
use crate::github::{GitHubClient, GitHubCommit, GitHubRepository};
use crate::readme::normalize_readme;
use crate::store;

use super::error::SyncError;
use super::gate::one_week_ago;

/// Conventional-commit breaking-change marker (e.g. `feat!:`), tested
/// against the first line of a commit message.
static BREAKING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+!:").expect("valid breaking marker regex"));

/// Whether a commit announces a breaking change.
fn is_breaking(commit: &GitHubCommit) -> bool {
    BREAKING_MARKER.is_match(commit.summary())
}

/// Orchestrates one sync of one plugin.
///
/// Holds the snapshot loaded by the gatekeeper. The three refresh
/// operations run concurrently and touch disjoint state (stars/description,
/// readme, the breaking-change table), so their results merge into the
/// snapshot without further coordination. The first failure aborts the
/// whole sync; nothing is persisted on a partial result.
#[derive(Debug)]
pub struct PluginSyncer {
    db: DatabaseConnection,
    github: GitHubClient,
    plugin: PluginModel,
    config_count: u64,
}

impl PluginSyncer {
    pub(crate) fn new(
        db: DatabaseConnection,
        github: GitHubClient,
        plugin: PluginWithCount,
    ) -> Self {
        Self {
            db,
            github,
            plugin: plugin.plugin,
            config_count: plugin.config_count,
        }
    }

    /// Run the full sync and persist the refreshed snapshot.
    ///
    /// Returns the persisted plugin merged with the pass-through config
    /// count.
    pub async fn sync(mut self) -> Result<PluginWithCount, SyncError> {
        tracing::info!(plugin = %self.plugin.full_name(), "syncing plugin");

        let (metadata, readme, _) = tokio::try_join!(
            self.fetch_metadata(),
            self.fetch_readme(),
            self.record_breaking_changes(),
        )?;

        self.plugin.stars = metadata.stargazers_count;
        if let Some(description) = metadata.description {
            self.plugin.short_description = description;
        }
        self.plugin.readme = readme;

        self.persist().await
    }

    async fn fetch_metadata(&self) -> Result<GitHubRepository, SyncError> {
        let repo = self
            .github
            .fetch_repository(&self.plugin.owner, &self.plugin.name)
            .await?;
        Ok(repo)
    }

    async fn fetch_readme(&self) -> Result<String, SyncError> {
        let readme = self
            .github
            .fetch_readme(&self.plugin.owner, &self.plugin.name)
            .await?;
        Ok(normalize_readme(
            &self.plugin.owner,
            &self.plugin.name,
            readme,
        ))
    }

    /// Scan commits since the last sync (or one week back on a first sync)
    /// and record every breaking change found.
    ///
    /// The upserts are spawned concurrently and gathered: every handle is
    /// awaited, and failures aggregate into
    /// [`SyncError::PartialBreakingChanges`] instead of being dropped.
    async fn record_breaking_changes(&self) -> Result<(), SyncError> {
        let since = self
            .plugin
            .last_synced_at
            .map(|ts| ts.with_timezone(&Utc))
            .unwrap_or_else(one_week_ago);

        let commits = self
            .github
            .fetch_commits(since, &self.plugin.owner, &self.plugin.name)
            .await?;

        let mut handles = Vec::new();
        for commit in commits.into_iter().filter(is_breaking) {
            let db = self.db.clone();
            let plugin_id = self.plugin.id;
            handles.push(tokio::spawn(async move {
                store::breaking_changes::upsert(
                    &db,
                    plugin_id,
                    &commit.sha,
                    &commit.html_url,
                    &commit.commit.message,
                )
                .await
            }));
        }

        let total = handles.len();
        let mut failed = 0usize;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!("breaking change upsert failed: {e}");
                    failed += 1;
                }
                Err(e) => {
                    tracing::warn!("breaking change task panicked: {e}");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(SyncError::PartialBreakingChanges {
                succeeded: total - failed,
                failed,
            });
        }

        if total > 0 {
            tracing::info!(
                plugin = %self.plugin.full_name(),
                count = total,
                "recorded breaking changes"
            );
        }

        Ok(())
    }

    /// Stamp the sync time and persist the snapshot.
    ///
    /// The update is conditional on `last_synced_at` still holding the
    /// value the snapshot was loaded with, which closes the race between
    /// two syncs that both passed the gate.
    async fn persist(mut self) -> Result<PluginWithCount, SyncError> {
        let previous = self.plugin.last_synced_at;
        self.plugin.last_synced_at = Some(Utc::now().fixed_offset());

        let persisted = store::plugins::update_synced(&self.db, &self.plugin, previous).await?;

        Ok(PluginWithCount {
            plugin: persisted,
            config_count: self.config_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> GitHubCommit {
        serde_json::from_value(serde_json::json!({
            "sha": "abc123",
            "html_url": "https://github.com/acme/plugin/commit/abc123",
            "commit": {"message": message}
        }))
        .expect("commit fixture should deserialize")
    }

    #[test]
    fn test_breaking_marker_matches_conventional_commits() {
        assert!(is_breaking(&commit("feat!: remove old API")));
        assert!(is_breaking(&commit("refactor!: drop deprecated setup()")));
        assert!(is_breaking(&commit("feat!: new\n\nlonger body text")));
    }

    #[test]
    fn test_breaking_marker_rejects_plain_commits() {
        assert!(!is_breaking(&commit("fix: typo")));
        assert!(!is_breaking(&commit("feat: add thing")));
        assert!(!is_breaking(&commit("")));
    }

    #[test]
    fn test_breaking_marker_only_reads_first_line() {
        assert!(!is_breaking(&commit("fix: typo\nfeat!: hidden in body")));
    }

    #[test]
    fn test_breaking_marker_needs_word_before_bang() {
        // A scope in parentheses breaks the `\w+!:` match.
        assert!(!is_breaking(&commit("feat(api)!: scoped")));
    }
}
