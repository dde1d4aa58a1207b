//! GitHub API client bound to a single user's access token.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::types::{GitHubCommit, GitHubRepository};

/// Base URL for the github.com REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Media type for standard JSON responses.
const ACCEPT_JSON: &str = "application/vnd.github+json";

/// Media type that returns the README as raw text.
const ACCEPT_RAW: &str = "application/vnd.github.raw+json";

/// GitHub API client.
///
/// Each sync constructs one from the acting user's stored token; the
/// underlying `reqwest::Client` keeps a shared connection pool across the
/// requests of that sync.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

impl GitHubClient {
    /// Create a client for the github.com API.
    pub fn new(token: &str) -> Self {
        Self::with_api_base(token, GITHUB_API_BASE)
    }

    /// Create a client against a non-default API base URL.
    pub fn with_api_base(token: &str, api_base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request with GitHub's status codes mapped to typed errors.
    async fn get(&self, route: &str, accept: &str) -> Result<reqwest::Response, GitHubError> {
        let url = format!("{}{}", self.api_base, route);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, accept)
            .header(USER_AGENT, "plugdex")
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| GitHubError::Internal(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GitHubError::AuthRequired),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound(route.to_string())),
            status if status.is_success() => Ok(response),
            status => Err(GitHubError::Api {
                status: status.as_u16(),
                route: route.to_string(),
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T, GitHubError> {
        self.get(route, ACCEPT_JSON)
            .await?
            .json()
            .await
            .map_err(|e| GitHubError::Internal(format!("JSON parse error: {}", e)))
    }

    /// Fetch repository metadata (star count and description).
    pub async fn fetch_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<GitHubRepository, GitHubError> {
        self.get_json(&format!("/repos/{}/{}", owner, name)).await
    }

    /// Fetch the repository README as raw text.
    pub async fn fetch_readme(&self, owner: &str, name: &str) -> Result<String, GitHubError> {
        self.get(&format!("/repos/{}/{}/readme", owner, name), ACCEPT_RAW)
            .await?
            .text()
            .await
            .map_err(|e| GitHubError::Internal(format!("body read failed: {}", e)))
    }

    /// Fetch all commits with author dates at or after `since`.
    ///
    /// Pages through the commit list 100 at a time until a short page
    /// signals the end.
    pub async fn fetch_commits(
        &self,
        since: DateTime<Utc>,
        owner: &str,
        name: &str,
    ) -> Result<Vec<GitHubCommit>, GitHubError> {
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut all_commits = Vec::new();
        let mut page = 1u32;

        loop {
            let route = format!(
                "/repos/{}/{}/commits?since={}&per_page=100&page={}",
                owner, name, since, page
            );
            let commits: Vec<GitHubCommit> = self.get_json(&route).await?;
            let count = commits.len();

            all_commits.extend(commits);

            // If we got fewer than 100, we've reached the end
            if count < 100 {
                break;
            }

            page += 1;
        }

        Ok(all_commits)
    }
}
