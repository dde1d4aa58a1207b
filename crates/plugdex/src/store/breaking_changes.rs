//! Breaking-change store operations.
//!
//! Rows are keyed by commit SHA: recording the same commit twice refreshes
//! the url and message in place, so re-scanning an overlapping commit
//! window stays idempotent.

use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::entity::breaking_change::{ActiveModel, Column, Entity as BreakingChange, Model};

use super::errors::{Result, StoreError};

/// Record a breaking change, inserting or refreshing the row for its SHA.
pub async fn upsert(
    db: &DatabaseConnection,
    plugin_id: Uuid,
    sha: &str,
    external_url: &str,
    message: &str,
) -> Result<()> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        plugin_id: Set(plugin_id),
        sha: Set(sha.to_string()),
        external_url: Set(external_url.to_string()),
        message: Set(message.to_string()),
        created_at: Set(Utc::now().fixed_offset()),
    };

    BreakingChange::insert(model)
        .on_conflict(
            OnConflict::column(Column::Sha)
                .update_columns([Column::ExternalUrl, Column::Message])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

/// List recorded breaking changes for a plugin, newest first.
pub async fn list_for_plugin(db: &DatabaseConnection, plugin_id: Uuid) -> Result<Vec<Model>> {
    BreakingChange::find()
        .filter(Column::PluginId.eq(plugin_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(StoreError::from)
}
