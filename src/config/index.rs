//! `[index]` section configuration.
//!
//! Locations of the pre-generated JSON collections.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[index]` section - content index endpoints.
///
/// # Example
/// ```toml
/// [index]
/// posts = "/index.json"
/// pages = "/talks/pages.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Endpoint returning the array of post records.
    #[serde(default = "defaults::index::posts")]
    #[educe(Default = defaults::index::posts())]
    pub posts: String,

    /// Endpoint returning the array of page records.
    #[serde(default = "defaults::index::pages")]
    #[educe(Default = defaults::index::pages())]
    pub pages: String,
}
