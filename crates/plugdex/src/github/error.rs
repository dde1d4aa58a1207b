//! GitHub API error types.

use thiserror::Error;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API error: status {status} for {route}")]
    Api { status: u16, route: String },

    #[error("Authentication required")]
    AuthRequired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let api = GitHubError::Api {
            status: 500,
            route: "/repos/acme/plugin".to_string(),
        };
        assert!(api.to_string().contains("500"));
        assert!(api.to_string().contains("/repos/acme/plugin"));

        let not_found = GitHubError::NotFound("/repos/acme/missing".to_string());
        assert!(not_found.to_string().contains("/repos/acme/missing"));
    }
}
