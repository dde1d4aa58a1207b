//! Link-handling strategies applied to README text.

use std::sync::LazyLock;

use regex::Regex;

/// Media links under a `github.com/.../blob/...` web-viewer path.
static BLOB_MEDIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https://github\.com/[a-zA-Z0-9/]+/blob/[a-zA-Z0-9/._]+\.(?:png|jpg|jpeg|mp4|webp)",
    )
    .expect("valid blob media regex")
});

/// Media links already served from a raw-content host.
static RAW_MEDIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https://(?:raw|user-images)\.githubusercontent\.com/[a-zA-Z0-9/]+/[a-zA-Z0-9/\-._]+\.(?:png|jpg|jpeg|mp4|gif)",
    )
    .expect("valid raw media regex")
});

/// The plugin a README belongs to; strategies that scope matches to the
/// plugin's own repository read it.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    pub owner: &'a str,
    pub name: &'a str,
}

/// One pass over the README text.
///
/// Strategies run in order, each receiving the previous pass's output. A
/// strategy that only observes links returns the text unchanged - that is
/// the extension point where future rewrite rules slot in.
pub trait LinkRewrite {
    /// Strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Apply the pass and return the (possibly rewritten) text.
    fn apply(&self, ctx: &RewriteContext<'_>, readme: String) -> String;
}

/// Rewrites `github.com/.../blob/...` media links to the raw-content host.
pub struct BlobMediaRewrite;

impl LinkRewrite for BlobMediaRewrite {
    fn name(&self) -> &'static str {
        "blob-media-rewrite"
    }

    fn apply(&self, _ctx: &RewriteContext<'_>, readme: String) -> String {
        // Matches are collected against the input before any replacement:
        // rewriting one link must not shift what the others match.
        let links: Vec<String> = BLOB_MEDIA
            .find_iter(&readme)
            .map(|m| m.as_str().to_string())
            .collect();

        let mut readme = readme;
        for link in links {
            let raw = link
                .replacen("github.com", "raw.githubusercontent.com", 1)
                .replacen("/blob", "", 1);
            tracing::debug!(strategy = self.name(), %link, %raw, "rewriting media link");
            readme = readme.replace(&link, &raw);
        }
        readme
    }
}

/// Observes media links already on raw-content hosts. Deliberate no-op.
pub struct RawMediaScan;

impl LinkRewrite for RawMediaScan {
    fn name(&self) -> &'static str {
        "raw-media-scan"
    }

    fn apply(&self, _ctx: &RewriteContext<'_>, readme: String) -> String {
        for m in RAW_MEDIA.find_iter(&readme) {
            tracing::debug!(
                strategy = self.name(),
                media = m.as_str(),
                "media link already served raw"
            );
        }
        readme
    }
}

/// Observes issue/PR attachment links scoped to the plugin's own
/// repository. Deliberate no-op.
pub struct AttachedAssetScan;

impl LinkRewrite for AttachedAssetScan {
    fn name(&self) -> &'static str {
        "attached-asset-scan"
    }

    fn apply(&self, ctx: &RewriteContext<'_>, readme: String) -> String {
        let pattern = format!(
            r"https://github\.com/{}/{}/assets/[0-9]+/[a-zA-Z0-9-]+",
            regex::escape(ctx.owner),
            regex::escape(ctx.name)
        );
        // Owner and name are escaped; the rest of the pattern is fixed, so
        // compilation cannot fail on user data.
        let Ok(asset_regex) = Regex::new(&pattern) else {
            return readme;
        };

        for m in asset_regex.find_iter(&readme) {
            tracing::debug!(
                strategy = self.name(),
                asset = m.as_str(),
                "attached asset link"
            );
        }
        readme
    }
}

/// The default strategy order for README normalization.
pub fn default_strategies() -> Vec<Box<dyn LinkRewrite + Send + Sync>> {
    vec![
        Box::new(BlobMediaRewrite),
        Box::new(RawMediaScan),
        Box::new(AttachedAssetScan),
    ]
}
