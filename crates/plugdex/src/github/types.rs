//! GitHub API data types.
//!
//! Only the fields the sync workflow consumes are deserialized; everything
//! else in the API responses is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Repository metadata returned by `GET /repos/{owner}/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    /// Star count.
    pub stargazers_count: i32,
    /// Short description. Null for repositories without one.
    pub description: Option<String>,
}

/// A commit returned by `GET /repos/{owner}/{name}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommit {
    /// Commit SHA.
    pub sha: String,
    /// Web link to the commit.
    pub html_url: String,
    /// Git-level commit details.
    pub commit: CommitDetail,
}

/// The git-level details of a commit.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    /// Full commit message.
    pub message: String,
    /// Author info, when GitHub can attribute it.
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

/// Commit author attribution.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    /// Author date.
    pub date: DateTime<Utc>,
}

impl GitHubCommit {
    /// The first line of the commit message.
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }
}
