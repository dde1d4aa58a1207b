use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Record not found.
    #[error("Not found: {context}")]
    NotFound { context: String },

    /// A conditional update matched no rows - a concurrent writer got there first.
    #[error("Conflict: {context}")]
    Conflict { context: String },

    /// Invalid input data.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl StoreError {
    /// Create a NotFound error for a plugin natural-key lookup.
    pub fn plugin_not_found(owner: &str, name: &str) -> Self {
        Self::NotFound {
            context: format!("plugin {}/{}", owner, name),
        }
    }

    /// Create a NotFound error for a user lookup.
    pub fn user_not_found(id: Uuid) -> Self {
        Self::NotFound {
            context: format!("user id={}", id),
        }
    }

    /// Create a NotFound error for a user without a stored token.
    pub fn token_not_found(id: Uuid) -> Self {
        Self::NotFound {
            context: format!("github token for user id={}", id),
        }
    }

    /// Create a Conflict error for a sync that lost the persist race.
    pub fn sync_raced(owner: &str, name: &str) -> Self {
        Self::Conflict {
            context: format!("plugin {}/{} was synced concurrently", owner, name),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
