//! Initial migration to create the plugdex database schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_users(manager).await?;
        self.create_plugins(manager).await?;
        self.create_breaking_changes(manager).await?;
        self.create_config_plugins(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConfigPlugins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BreakingChanges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plugins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_users(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::GithubId).big_integer().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::GithubToken).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on github_id
        manager
            .create_index(
                Index::create()
                    .name("idx_users_github_id")
                    .table(Users::Table)
                    .col(Users::GithubId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_plugins(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Plugins::Table)
                    .if_not_exists()
                    // Internal
                    .col(ColumnDef::new(Plugins::Id).uuid().not_null().primary_key())
                    // Naming
                    .col(ColumnDef::new(Plugins::Owner).string().not_null())
                    .col(ColumnDef::new(Plugins::Name).string().not_null())
                    // Catalog metadata
                    .col(ColumnDef::new(Plugins::Source).string().not_null())
                    .col(ColumnDef::new(Plugins::Category).string().not_null())
                    .col(ColumnDef::new(Plugins::Link).text().not_null())
                    .col(
                        ColumnDef::new(Plugins::ShortDescription)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Plugins::Readme)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    // Statistics
                    .col(
                        ColumnDef::new(Plugins::Stars)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    // Tracking
                    .col(
                        ColumnDef::new(Plugins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Plugins::LastSyncedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on (owner, name) - the natural key
        manager
            .create_index(
                Index::create()
                    .name("idx_plugins_owner_name")
                    .table(Plugins::Table)
                    .col(Plugins::Owner)
                    .col(Plugins::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on created_at (descending) for the feed query
        manager
            .create_index(
                Index::create()
                    .name("idx_plugins_created")
                    .table(Plugins::Table)
                    .col((Plugins::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_breaking_changes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BreakingChanges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BreakingChanges::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BreakingChanges::PluginId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BreakingChanges::Sha).string().not_null())
                    .col(
                        ColumnDef::new(BreakingChanges::ExternalUrl)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BreakingChanges::Message)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BreakingChanges::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_breaking_changes_plugin")
                            .from(BreakingChanges::Table, BreakingChanges::PluginId)
                            .to(Plugins::Table, Plugins::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique constraint on sha - the upsert key
        manager
            .create_index(
                Index::create()
                    .name("idx_breaking_changes_sha")
                    .table(BreakingChanges::Table)
                    .col(BreakingChanges::Sha)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on plugin_id
        manager
            .create_index(
                Index::create()
                    .name("idx_breaking_changes_plugin")
                    .table(BreakingChanges::Table)
                    .col(BreakingChanges::PluginId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_config_plugins(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConfigPlugins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConfigPlugins::ConfigId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ConfigPlugins::PluginId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ConfigPlugins::ConfigId)
                            .col(ConfigPlugins::PluginId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_config_plugins_plugin")
                            .from(ConfigPlugins::Table, ConfigPlugins::PluginId)
                            .to(Plugins::Table, Plugins::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on plugin_id for the count query
        manager
            .create_index(
                Index::create()
                    .name("idx_config_plugins_plugin")
                    .table(ConfigPlugins::Table)
                    .col(ConfigPlugins::PluginId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "users")]
enum Users {
    Table,
    Id,
    GithubId,
    Username,
    GithubToken,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "plugins")]
enum Plugins {
    Table,
    Id,
    Owner,
    Name,
    Source,
    Category,
    Link,
    ShortDescription,
    Readme,
    Stars,
    CreatedAt,
    LastSyncedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "breaking_changes")]
enum BreakingChanges {
    Table,
    Id,
    PluginId,
    Sha,
    ExternalUrl,
    Message,
    CreatedAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "config_plugins")]
enum ConfigPlugins {
    Table,
    ConfigId,
    PluginId,
}
