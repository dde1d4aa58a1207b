//! BreakingChange entity - commits flagged by the conventional-commit `!:` marker.
//!
//! Rows are append-only: the sync workflow creates one per matching commit
//! and re-syncing the same window refreshes it in place by SHA.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// BreakingChange model - one flagged commit for a plugin.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "breaking_changes")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Plugin this change was recorded against.
    pub plugin_id: Uuid,

    /// Commit SHA. Unique: the upsert key.
    #[sea_orm(unique)]
    pub sha: String,

    /// Web link to the commit on the code host.
    #[sea_orm(column_type = "Text")]
    pub external_url: String,

    /// Full commit message (all lines, not just the flagged first line).
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// When the row was first recorded.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A breaking change belongs to a plugin.
    #[sea_orm(
        belongs_to = "super::plugin::Entity",
        from = "Column::PluginId",
        to = "super::plugin::Column::Id"
    )]
    Plugin,
}

impl Related<super::plugin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plugin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
