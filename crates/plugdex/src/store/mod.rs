//! Persistence operations for plugdex entities.
//!
//! This module provides free async functions over a `DatabaseConnection`
//! for the three stores the sync workflow touches: plugins, users (token
//! lookup), and breaking changes.

pub mod breaking_changes;
mod errors;
pub mod plugins;
pub mod users;

pub use errors::{Result, StoreError};
