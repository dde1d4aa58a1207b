//! Sync error taxonomy.

use thiserror::Error;

use crate::github::GitHubError;
use crate::store::StoreError;

/// Errors that can occur during a plugin sync.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The daily gate rejected the sync before any work began.
    #[error("plugin {owner}/{name} was synced less than a day ago")]
    SyncedTooRecently { owner: String, name: String },

    /// Store failure (lookup or persistence).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Upstream failure from the code host.
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// Some breaking-change writes failed while others landed.
    #[error("breaking change writes partially failed: {succeeded} succeeded, {failed} failed")]
    PartialBreakingChanges { succeeded: usize, failed: usize },
}
