//! User entity - catalog accounts and their stored code-host tokens.

use sea_orm::entity::prelude::*;

/// User model - identifies who may trigger syncs and holds their API token.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Numeric account id on the code host.
    #[sea_orm(unique)]
    pub github_id: i64,

    /// Login name on the code host.
    pub username: String,

    /// Stored GitHub access token, if the user has authorized one.
    /// Syncs on behalf of this user fail without it.
    pub github_token: Option<String>,

    /// When the account was first seen.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
