//! Plugin store operations.

use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::config_plugin::{Column as ConfigPluginColumn, Entity as ConfigPlugin};
use crate::entity::plugin::{ActiveModel, Column, Entity as Plugin, Model, PluginWithCount};

use super::errors::{Result, StoreError};

/// Find a plugin by its natural key (owner + name).
pub async fn find_by_natural_key(
    db: &DatabaseConnection,
    owner: &str,
    name: &str,
) -> Result<Option<Model>> {
    Plugin::find()
        .filter(Column::Owner.eq(owner))
        .filter(Column::Name.eq(name))
        .one(db)
        .await
        .map_err(StoreError::from)
}

/// Load a plugin by its natural key together with its config count.
///
/// The count is the number of `config_plugins` rows referencing the plugin.
///
/// # Errors
/// Returns `StoreError::NotFound` if no plugin exists for the key.
pub async fn find_with_count(
    db: &DatabaseConnection,
    owner: &str,
    name: &str,
) -> Result<PluginWithCount> {
    let plugin = find_by_natural_key(db, owner, name)
        .await?
        .ok_or_else(|| StoreError::plugin_not_found(owner, name))?;

    let config_count = ConfigPlugin::find()
        .filter(ConfigPluginColumn::PluginId.eq(plugin.id))
        .count(db)
        .await?;

    Ok(PluginWithCount {
        plugin,
        config_count,
    })
}

/// Insert a new plugin.
pub async fn insert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    model.insert(db).await.map_err(StoreError::from)
}

/// Insert or update a plugin by its natural key (owner + name).
pub async fn upsert(db: &DatabaseConnection, model: ActiveModel) -> Result<Model> {
    let owner = required_active_value("owner", &model.owner)?;
    let name = required_active_value("name", &model.name)?;

    let existing = find_by_natural_key(db, &owner, &name).await?;

    match existing {
        Some(existing) => {
            let mut update_model = model;
            update_model.id = Set(existing.id);
            update_model.update(db).await.map_err(StoreError::from)
        }
        None => {
            let mut insert_model = model;
            if insert_model.id.is_not_set() {
                insert_model.id = Set(Uuid::new_v4());
            }
            insert_model.insert(db).await.map_err(StoreError::from)
        }
    }
}

/// List the most recently added plugins, newest first.
pub async fn latest(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>> {
    Plugin::find()
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
        .map_err(StoreError::from)
}

/// Persist a synced plugin snapshot, guarded against concurrent syncs.
///
/// Only the fields a sync is allowed to touch are written: `stars`,
/// `short_description`, `readme`, and `last_synced_at`. The update is
/// conditional on `last_synced_at` still holding the value the snapshot
/// was loaded with (`IS NULL` for a never-synced plugin); zero affected
/// rows means another sync persisted in the meantime.
///
/// # Errors
/// Returns `StoreError::Conflict` when the condition no longer holds.
pub async fn update_synced(
    db: &DatabaseConnection,
    model: &Model,
    expected_last_synced_at: Option<DateTime<FixedOffset>>,
) -> Result<Model> {
    let active = ActiveModel {
        stars: Set(model.stars),
        short_description: Set(model.short_description.clone()),
        readme: Set(model.readme.clone()),
        last_synced_at: Set(model.last_synced_at),
        ..Default::default()
    };

    let update = Plugin::update_many()
        .set(active)
        .filter(Column::Id.eq(model.id));
    let update = match expected_last_synced_at {
        Some(ts) => update.filter(Column::LastSyncedAt.eq(ts)),
        None => update.filter(Column::LastSyncedAt.is_null()),
    };

    let result = update.exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::sync_raced(&model.owner, &model.name));
    }

    Plugin::find_by_id(model.id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::plugin_not_found(&model.owner, &model.name))
}

fn required_active_value<T: Clone + Into<sea_orm::Value>>(
    field: &str,
    value: &ActiveValue<T>,
) -> Result<T> {
    match value {
        ActiveValue::Set(value) | ActiveValue::Unchanged(value) => Ok(value.clone()),
        ActiveValue::NotSet => Err(StoreError::InvalidInput {
            message: format!("Missing required field: {}", field),
        }),
    }
}
