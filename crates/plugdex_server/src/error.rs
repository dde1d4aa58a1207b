//! HTTP error mapping for the plugdex API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use plugdex::{StoreError, SyncError};

/// Errors surfaced by the HTTP layer.
#[derive(Debug)]
pub enum ApiError {
    /// The request did not identify an acting user.
    MissingUser,
    /// Error from the sync workflow or a store.
    Sync(SyncError),
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        Self::Sync(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Sync(SyncError::Store(err))
    }
}

impl ApiError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUser => StatusCode::BAD_REQUEST,
            ApiError::Sync(SyncError::SyncedTooRecently { .. }) => StatusCode::FORBIDDEN,
            ApiError::Sync(SyncError::Store(StoreError::NotFound { .. })) => StatusCode::NOT_FOUND,
            ApiError::Sync(SyncError::Store(StoreError::Conflict { .. })) => StatusCode::CONFLICT,
            ApiError::Sync(SyncError::GitHub(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Sync(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::MissingUser => "missing or invalid x-user-id header".to_string(),
            ApiError::Sync(SyncError::GitHub(e)) => {
                tracing::warn!("code host request failed: {e}");
                "code host request failed".to_string()
            }
            ApiError::Sync(e) if status.is_server_error() => {
                // 5xx details are logged, never leaked.
                tracing::error!("sync failed: {e}");
                "internal error".to_string()
            }
            ApiError::Sync(e) => e.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let forbidden: ApiError = SyncError::SyncedTooRecently {
            owner: "a".to_string(),
            name: "b".to_string(),
        }
        .into();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let not_found: ApiError = StoreError::plugin_not_found("a", "b").into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict: ApiError = StoreError::sync_raced("a", "b").into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let upstream: ApiError = SyncError::GitHub(plugdex::github::GitHubError::AuthRequired).into();
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let partial: ApiError = SyncError::PartialBreakingChanges {
            succeeded: 1,
            failed: 2,
        }
        .into();
        assert_eq!(partial.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(ApiError::MissingUser.status(), StatusCode::BAD_REQUEST);
    }
}
