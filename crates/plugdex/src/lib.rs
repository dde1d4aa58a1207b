//! Plugdex - a plugin catalog sync engine.
//!
//! This library keeps a catalog of plugins in sync with their upstream
//! GitHub repositories: star counts, short descriptions, normalized README
//! text, and a record of breaking-change commits. It also renders a cached
//! RSS feed of newly added plugins for the web layer to serve.
//!
//! # Example
//!
//! ```ignore
//! use plugdex::{connect_and_migrate, github::GITHUB_API_BASE, sync};
//!
//! let db = connect_and_migrate("sqlite://plugdex.db?mode=rwc").await?;
//!
//! // Gate, then sync one plugin on behalf of a user.
//! let syncer = sync::plugin_syncer(&db, GITHUB_API_BASE, user_id, "acme", "plugin.nvim").await?;
//! let synced = syncer.sync().await?;
//! println!("{} now has {} stars", synced.plugin.full_name(), synced.plugin.stars);
//! ```

pub mod db;
pub mod entity;
pub mod feed;
pub mod github;
pub mod migration;
pub mod readme;
pub mod store;
pub mod sync;

pub use db::{connect, connect_and_migrate};
pub use entity::prelude::*;
pub use store::StoreError;
pub use sync::SyncError;
