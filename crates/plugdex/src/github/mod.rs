//! GitHub API client for plugin sync operations.
//!
//! This module provides the three fetches the sync workflow needs:
//! repository metadata, raw README text, and commits since a timestamp.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Response data structures
//! - [`client`] - The per-token client

mod client;
mod error;
mod types;

// Re-export error types
pub use error::GitHubError;

// Re-export client
pub use client::{GITHUB_API_BASE, GitHubClient};

// Re-export response types
pub use types::{CommitAuthor, CommitDetail, GitHubCommit, GitHubRepository};
