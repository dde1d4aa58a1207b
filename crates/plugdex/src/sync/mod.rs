//! Plugin sync workflow.
//!
//! Control flow: the gatekeeper ([`plugin_syncer`]) loads the acting
//! user's token and the plugin snapshot and enforces the daily gate; the
//! returned [`PluginSyncer`] then runs the star/description refresh, the
//! README normalization, and the breaking-change scan concurrently and
//! persists the merged snapshot.

mod error;
mod gate;
mod syncer;

pub use error::SyncError;
pub use gate::{FIRST_SYNC_WINDOW_DAYS, SYNC_COOLDOWN_HOURS, plugin_syncer};
pub use syncer::PluginSyncer;
