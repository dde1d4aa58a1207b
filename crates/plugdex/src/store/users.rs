//! User store operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::user::{ActiveModel, Column, Entity as User, Model};

use super::errors::{Result, StoreError};

/// Find a user by id.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>> {
    User::find_by_id(id).one(db).await.map_err(StoreError::from)
}

/// Get the stored GitHub token for a user.
///
/// # Errors
/// Returns `StoreError::NotFound` if the user does not exist or has no
/// stored token.
pub async fn github_token(db: &DatabaseConnection, user_id: Uuid) -> Result<String> {
    let user = find_by_id(db, user_id)
        .await?
        .ok_or_else(|| StoreError::user_not_found(user_id))?;

    user.github_token
        .ok_or_else(|| StoreError::token_not_found(user_id))
}

/// Insert or update a user by their code-host account id.
pub async fn upsert(
    db: &DatabaseConnection,
    github_id: i64,
    username: &str,
    github_token: Option<&str>,
) -> Result<Model> {
    let existing = User::find()
        .filter(Column::GithubId.eq(github_id))
        .one(db)
        .await?;

    match existing {
        Some(existing) => {
            let model = ActiveModel {
                id: Set(existing.id),
                username: Set(username.to_string()),
                github_token: Set(github_token.map(String::from)),
                ..Default::default()
            };
            model.update(db).await.map_err(StoreError::from)
        }
        None => {
            let model = ActiveModel {
                id: Set(Uuid::new_v4()),
                github_id: Set(github_id),
                username: Set(username.to_string()),
                github_token: Set(github_token.map(String::from)),
                created_at: Set(chrono::Utc::now().fixed_offset()),
            };
            model.insert(db).await.map_err(StoreError::from)
        }
    }
}
