//! In-process cache for the rendered plugin feed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::store::StoreError;

/// Server-side lifetime of a rendered feed document.
pub const FEED_TTL: Duration = Duration::from_secs(60 * 60 * 24);

struct CachedDocument {
    rendered_at: Instant,
    body: Arc<str>,
}

/// Caches the rendered feed document for [`FEED_TTL`].
///
/// Reads are lock-shared; a stale document is re-rendered under the write
/// lock with a second freshness check, so concurrent requests during a
/// refresh render at most once.
pub struct FeedCache {
    ttl: Duration,
    inner: RwLock<Option<CachedDocument>>,
}

impl FeedCache {
    /// Cache with the standard one-day lifetime.
    pub fn new() -> Self {
        Self::with_ttl(FEED_TTL)
    }

    /// Cache with a custom lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(None),
        }
    }

    /// Return the cached document, re-rendering it when stale.
    pub async fn get_or_render(&self, db: &DatabaseConnection) -> Result<Arc<str>, StoreError> {
        if let Some(cached) = self.inner.read().await.as_ref()
            && cached.rendered_at.elapsed() < self.ttl
        {
            return Ok(Arc::clone(&cached.body));
        }

        let mut slot = self.inner.write().await;

        // Another task may have refreshed while we waited for the lock.
        if let Some(cached) = slot.as_ref()
            && cached.rendered_at.elapsed() < self.ttl
        {
            return Ok(Arc::clone(&cached.body));
        }

        let body: Arc<str> = super::render_latest(db).await?.into();
        *slot = Some(CachedDocument {
            rendered_at: Instant::now(),
            body: Arc::clone(&body),
        });

        tracing::debug!("plugin feed re-rendered");
        Ok(body)
    }
}

impl Default for FeedCache {
    fn default() -> Self {
        Self::new()
    }
}
