//! Plugin entity - one cataloged plugin tracked by its owner/name pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plugin model - catalog record refreshed by the sync workflow.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plugins")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    // ─── Naming ──────────────────────────────────────────────────────────────
    /// Owner login (user or organization) on the code host.
    pub owner: String,
    /// Repository name. `(owner, name)` is the natural key.
    pub name: String,

    // ─── Catalog metadata ────────────────────────────────────────────────────
    /// Where the plugin was discovered (e.g. an awesome-list slug).
    pub source: String,
    /// Catalog category.
    pub category: String,
    /// Web link to the repository.
    #[sea_orm(column_type = "Text")]
    pub link: String,
    /// One-line description shown in listings.
    #[sea_orm(column_type = "Text")]
    pub short_description: String,
    /// README text with media links normalized to raw-content hosts.
    #[sea_orm(column_type = "Text", default_value = "")]
    pub readme: String,

    // ─── Statistics ──────────────────────────────────────────────────────────
    /// Star count from the code host.
    #[sea_orm(default_value = 0)]
    pub stars: i32,

    // ─── Tracking ────────────────────────────────────────────────────────────
    /// When the plugin was added to the catalog.
    pub created_at: DateTimeWithTimeZone,
    /// When the plugin was last synced from the code host.
    /// Null until the first sync completes.
    pub last_synced_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A plugin has many recorded breaking changes.
    #[sea_orm(has_many = "super::breaking_change::Entity")]
    BreakingChanges,
    /// A plugin is referenced by many user configurations.
    #[sea_orm(has_many = "super::config_plugin::Entity")]
    ConfigPlugins,
}

impl Related<super::breaking_change::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BreakingChanges.def()
    }
}

impl Related<super::config_plugin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConfigPlugins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Compute the full name (owner/name).
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A plugin together with the number of user configurations referencing it.
///
/// The count is derived data: it rides along through sync results unmodified
/// and is never written back by this subsystem.
#[derive(Clone, Debug, Serialize)]
pub struct PluginWithCount {
    #[serde(flatten)]
    pub plugin: Model,
    pub config_count: u64,
}
