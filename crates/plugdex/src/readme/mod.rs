//! README link normalization.
//!
//! README text fetched from the code host embeds media through web-viewer
//! links (`github.com/.../blob/...`) that do not resolve as images outside
//! the code host's own pages. Normalization rewrites those onto the
//! raw-content host so the catalog can render the README as-is.
//!
//! The work is organized as an ordered set of [`LinkRewrite`] strategies;
//! two of them currently observe-and-log only, kept as named extension
//! points rather than dead branches.

mod rewrite;

pub use rewrite::{
    AttachedAssetScan, BlobMediaRewrite, LinkRewrite, RawMediaScan, RewriteContext,
    default_strategies,
};

/// Normalize media links in README text.
///
/// Runs the default strategy set in order and returns the rewritten text.
pub fn normalize_readme(owner: &str, name: &str, readme: String) -> String {
    let ctx = RewriteContext { owner, name };
    default_strategies()
        .iter()
        .fold(readme, |text, strategy| strategy.apply(&ctx, text))
}
