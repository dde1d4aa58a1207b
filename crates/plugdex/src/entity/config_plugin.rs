//! ConfigPlugin entity - join rows linking user configurations to plugins.
//!
//! Configurations themselves are owned by the web application; this
//! subsystem only counts the rows to derive a plugin's `config_count`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// ConfigPlugin model - one configuration referencing one plugin.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "config_plugins")]
pub struct Model {
    /// Configuration id (owned by the web application).
    #[sea_orm(primary_key, auto_increment = false)]
    pub config_id: Uuid,

    /// Plugin referenced by the configuration.
    #[sea_orm(primary_key, auto_increment = false)]
    pub plugin_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A join row belongs to a plugin.
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
