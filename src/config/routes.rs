//! `[routes]` section configuration.
//!
//! URL scheme of the static site and the markers of a rendered post.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[routes]` section - URL prefixes and page markers.
///
/// # Example
/// ```toml
/// [routes]
/// post_prefix = "/blog/"
/// content_region = ".post-layout .post-content .post-body"
/// tag_prefix = "/tags/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RoutesConfig {
    /// Path prefix every post lives under. Must start and end with `/`.
    #[serde(default = "defaults::routes::post_prefix")]
    #[educe(Default = defaults::routes::post_prefix())]
    pub post_prefix: String,

    /// Selector present only on a server-rendered post.
    #[serde(default = "defaults::routes::content_region")]
    #[educe(Default = defaults::routes::content_region())]
    pub content_region: String,

    /// Path prefix of tag listing pages.
    #[serde(default = "defaults::routes::tag_prefix")]
    #[educe(Default = defaults::routes::tag_prefix())]
    pub tag_prefix: String,
}

impl RoutesConfig {
    /// URL of a post overlay, e.g. `/blog/hello/`.
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}{slug}/", self.post_prefix)
    }

    /// URL of a tag listing, e.g. `/tags/rust-lang`.
    pub fn tag_url(&self, tag: &str) -> String {
        let tag = tag
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        format!("{}{tag}", self.tag_prefix)
    }
}
