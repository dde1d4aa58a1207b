//! SeaORM entity definitions for the plugdex database schema.

pub mod breaking_change;
pub mod config_plugin;
pub mod plugin;
pub mod prelude;
pub mod user;
