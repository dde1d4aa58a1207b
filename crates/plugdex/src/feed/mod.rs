//! RSS feed of newly added plugins.
//!
//! The feed is rendered from the newest catalog entries and cached
//! in-process for a day; the HTTP layer serves the cached document with
//! matching intermediary cache directives.

mod cache;

pub use cache::{FEED_TTL, FeedCache};

use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};
use sea_orm::DatabaseConnection;

use crate::entity::plugin::Model as PluginModel;
use crate::store::{self, StoreError};

/// How many plugins the feed carries.
pub const FEED_SIZE: u64 = 30;

/// Render the RSS 2.0 document for a list of plugins, newest first.
pub fn render(plugins: &[PluginModel]) -> String {
    let items: Vec<rss::Item> = plugins
        .iter()
        .map(|plugin| {
            ItemBuilder::default()
                .title(plugin.full_name())
                .link(plugin.link.clone())
                .description(plugin.short_description.clone())
                .guid(
                    GuidBuilder::default()
                        .value(plugin.link.clone())
                        .permalink(true)
                        .build(),
                )
                .pub_date(plugin.created_at.to_rfc2822())
                .build()
        })
        .collect();

    let channel = ChannelBuilder::default()
        .title("Newly added plugins")
        .link("https://plugdex.dev/neovim/plugins")
        .description("Plugins recently added to the catalog")
        .items(items)
        .build();

    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", channel)
}

/// Load the latest plugins and render the feed document.
pub async fn render_latest(db: &DatabaseConnection) -> Result<String, StoreError> {
    let plugins = store::plugins::latest(db, FEED_SIZE).await?;
    Ok(render(&plugins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn plugin(owner: &str, name: &str) -> PluginModel {
        PluginModel {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name: name.to_string(),
            source: "awesome-list".to_string(),
            category: "editing".to_string(),
            link: format!("https://github.com/{}/{}", owner, name),
            short_description: "Does things".to_string(),
            readme: String::new(),
            stars: 5,
            created_at: Utc::now().fixed_offset(),
            last_synced_at: None,
        }
    }

    #[test]
    fn test_render_includes_items_and_declaration() {
        let feed = render(&[plugin("acme", "one.nvim"), plugin("acme", "two.nvim")]);

        assert!(feed.starts_with("<?xml version=\"1.0\""));
        assert!(feed.contains("<rss"));
        assert!(feed.contains("<title>acme/one.nvim</title>"));
        assert!(feed.contains("<title>acme/two.nvim</title>"));
        assert!(feed.contains("https://github.com/acme/one.nvim"));
    }

    #[test]
    fn test_render_empty_catalog_still_valid_channel() {
        let feed = render(&[]);
        assert!(feed.contains("<rss"));
        assert!(feed.contains("Newly added plugins"));
        assert!(!feed.contains("<item>"));
    }
}
