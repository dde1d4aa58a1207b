//! Integration tests for the store modules.
//!
//! Runs against in-memory SQLite with migrations applied, exercising the
//! natural-key upserts, the config-count join, the token lookup, and the
//! conditional sync update.

use chrono::{Duration, Utc};
use plugdex::connect_and_migrate;
use plugdex::entity::config_plugin::{
    ActiveModel as ConfigPluginActiveModel, Entity as ConfigPlugin,
};
use plugdex::entity::plugin::ActiveModel as PluginActiveModel;
use plugdex::store::{self, StoreError};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

async fn setup_test_db() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

fn plugin_model(owner: &str, name: &str) -> PluginActiveModel {
    let now = Utc::now().fixed_offset();
    PluginActiveModel {
        id: Set(Uuid::new_v4()),
        owner: Set(owner.to_string()),
        name: Set(name.to_string()),
        source: Set("awesome-list".to_string()),
        category: Set("editing".to_string()),
        link: Set(format!("https://github.com/{}/{}", owner, name)),
        short_description: Set("A test plugin".to_string()),
        readme: Set(String::new()),
        stars: Set(0),
        created_at: Set(now),
        last_synced_at: Set(None),
    }
}

// ─── Plugin Store ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upsert_inserts_then_updates_in_place() {
    let db = setup_test_db().await;

    let first = store::plugins::upsert(&db, plugin_model("acme", "plugin.nvim"))
        .await
        .expect("first upsert should insert");

    let mut second = plugin_model("acme", "plugin.nvim");
    second.id = sea_orm::ActiveValue::NotSet;
    second.category = Set("colorscheme".to_string());
    let updated = store::plugins::upsert(&db, second)
        .await
        .expect("second upsert should update");

    assert_eq!(updated.id, first.id);
    assert_eq!(updated.category, "colorscheme");

    let found = store::plugins::find_by_natural_key(&db, "acme", "plugin.nvim")
        .await
        .expect("lookup should succeed")
        .expect("plugin should exist");
    assert_eq!(found.id, first.id);
}

#[tokio::test]
async fn test_find_with_count_counts_config_rows() {
    let db = setup_test_db().await;

    let plugin = store::plugins::insert(&db, plugin_model("acme", "plugin.nvim"))
        .await
        .expect("insert should succeed");

    for _ in 0..3 {
        let row = ConfigPluginActiveModel {
            config_id: Set(Uuid::new_v4()),
            plugin_id: Set(plugin.id),
        };
        ConfigPlugin::insert(row)
            .exec(&db)
            .await
            .expect("config row should insert");
    }

    let with_count = store::plugins::find_with_count(&db, "acme", "plugin.nvim")
        .await
        .expect("lookup should succeed");
    assert_eq!(with_count.config_count, 3);

    store::plugins::insert(&db, plugin_model("acme", "lonely.nvim"))
        .await
        .expect("insert should succeed");
    let lonely = store::plugins::find_with_count(&db, "acme", "lonely.nvim")
        .await
        .expect("lookup should succeed");
    assert_eq!(lonely.config_count, 0);
}

#[tokio::test]
async fn test_find_with_count_unknown_plugin_is_not_found() {
    let db = setup_test_db().await;

    let err = store::plugins::find_with_count(&db, "nobody", "nothing")
        .await
        .expect_err("missing plugin should error");
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_latest_orders_newest_first_and_limits() {
    let db = setup_test_db().await;

    let now = Utc::now();
    for (i, name) in ["old.nvim", "mid.nvim", "new.nvim"].iter().enumerate() {
        let mut model = plugin_model("acme", name);
        model.created_at = Set((now - Duration::days(10 - i as i64)).fixed_offset());
        store::plugins::insert(&db, model)
            .await
            .expect("insert should succeed");
    }

    let latest = store::plugins::latest(&db, 2).await.expect("latest should succeed");
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].name, "new.nvim");
    assert_eq!(latest[1].name, "mid.nvim");
}

#[tokio::test]
async fn test_update_synced_writes_only_sync_fields() {
    let db = setup_test_db().await;

    let inserted = store::plugins::insert(&db, plugin_model("acme", "plugin.nvim"))
        .await
        .expect("insert should succeed");

    let mut snapshot = inserted.clone();
    snapshot.stars = 99;
    snapshot.short_description = "Refreshed".to_string();
    snapshot.readme = "# readme".to_string();
    snapshot.last_synced_at = Some(Utc::now().fixed_offset());

    let persisted = store::plugins::update_synced(&db, &snapshot, None)
        .await
        .expect("conditional update should succeed");

    assert_eq!(persisted.stars, 99);
    assert_eq!(persisted.short_description, "Refreshed");
    assert_eq!(persisted.readme, "# readme");
    assert!(persisted.last_synced_at.is_some());
    // Untouched columns survive.
    assert_eq!(persisted.category, inserted.category);
    assert_eq!(persisted.created_at, inserted.created_at);
}

#[tokio::test]
async fn test_update_synced_detects_lost_race() {
    let db = setup_test_db().await;

    let inserted = store::plugins::insert(&db, plugin_model("acme", "plugin.nvim"))
        .await
        .expect("insert should succeed");

    // Two syncers load the same never-synced snapshot.
    let mut winner = inserted.clone();
    winner.last_synced_at = Some(Utc::now().fixed_offset());
    store::plugins::update_synced(&db, &winner, None)
        .await
        .expect("first writer should win");

    let mut loser = inserted.clone();
    loser.stars = 1;
    loser.last_synced_at = Some(Utc::now().fixed_offset());
    let err = store::plugins::update_synced(&db, &loser, None)
        .await
        .expect_err("second writer should lose the race");

    assert!(matches!(err, StoreError::Conflict { .. }));

    // The loser wrote nothing.
    let stored = store::plugins::find_by_natural_key(&db, "acme", "plugin.nvim")
        .await
        .expect("lookup should succeed")
        .expect("plugin should exist");
    assert_eq!(stored.stars, inserted.stars);
}

// ─── User Store ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_github_token_requires_existing_user_with_token() {
    let db = setup_test_db().await;

    let err = store::users::github_token(&db, Uuid::new_v4())
        .await
        .expect_err("unknown user should error");
    assert!(matches!(err, StoreError::NotFound { .. }));

    let tokenless = store::users::upsert(&db, 101, "no-token", None)
        .await
        .expect("upsert should succeed");
    let err = store::users::github_token(&db, tokenless.id)
        .await
        .expect_err("tokenless user should error");
    assert!(matches!(err, StoreError::NotFound { .. }));

    let user = store::users::upsert(&db, 102, "has-token", Some("gh-token"))
        .await
        .expect("upsert should succeed");
    let token = store::users::github_token(&db, user.id)
        .await
        .expect("token lookup should succeed");
    assert_eq!(token, "gh-token");
}

#[tokio::test]
async fn test_user_upsert_is_keyed_on_github_id() {
    let db = setup_test_db().await;

    let first = store::users::upsert(&db, 55, "original", None)
        .await
        .expect("insert should succeed");
    let second = store::users::upsert(&db, 55, "renamed", Some("tok"))
        .await
        .expect("update should succeed");

    assert_eq!(second.id, first.id);
    assert_eq!(second.username, "renamed");
    assert_eq!(second.github_token.as_deref(), Some("tok"));
}

// ─── Breaking-Change Store ───────────────────────────────────────────────────

#[tokio::test]
async fn test_breaking_change_upsert_is_idempotent_by_sha() {
    let db = setup_test_db().await;

    let plugin = store::plugins::insert(&db, plugin_model("acme", "plugin.nvim"))
        .await
        .expect("insert should succeed");

    store::breaking_changes::upsert(
        &db,
        plugin.id,
        "abc123",
        "https://github.com/acme/plugin.nvim/commit/abc123",
        "feat!: first wording",
    )
    .await
    .expect("first upsert should succeed");

    store::breaking_changes::upsert(
        &db,
        plugin.id,
        "abc123",
        "https://github.com/acme/plugin.nvim/commit/abc123",
        "feat!: amended wording",
    )
    .await
    .expect("second upsert should succeed");

    let rows = store::breaking_changes::list_for_plugin(&db, plugin.id)
        .await
        .expect("list should succeed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].message, "feat!: amended wording");
}
