//! Common re-exports for convenient entity usage.

pub use super::breaking_change::{
    ActiveModel as BreakingChangeActiveModel, Column as BreakingChangeColumn,
    Entity as BreakingChange, Model as BreakingChangeModel,
};
pub use super::config_plugin::{
    ActiveModel as ConfigPluginActiveModel, Column as ConfigPluginColumn, Entity as ConfigPlugin,
    Model as ConfigPluginModel,
};
pub use super::plugin::{
    ActiveModel as PluginActiveModel, Column as PluginColumn, Entity as Plugin,
    Model as PluginModel, PluginWithCount,
};
pub use super::user::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
};
