//! Records of the pre-generated content index.
//!
//! Posts and pages share one record type: pages simply leave the post-only
//! fields empty. Field names follow the JSON emitted by the theme's index
//! templates (`readingTime`, `dateFormatted`, ...).

use serde::{Deserialize, Deserializer};

use crate::utils::date;

/// One post or page, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    /// Stable identifier. Not every generator fills it in.
    #[serde(default)]
    pub slug: Option<String>,

    /// Canonical path (e.g., "/blog/hello-world/")
    pub url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Short description of a post
    #[serde(default)]
    pub excerpt: Option<String>,

    /// Short description of a page; some generators emit it for posts too
    #[serde(default)]
    pub summary: Option<String>,

    /// Pre-rendered HTML body
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    /// Tags, order irrelevant. `null` is accepted as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Publication date as an ISO 8601 string
    #[serde(default)]
    pub date: Option<String>,

    /// Display date rendered by the site generator
    #[serde(default)]
    pub date_formatted: Option<String>,

    /// Estimated reading time in minutes
    #[serde(default, deserialize_with = "null_as_default")]
    pub reading_time: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,

    #[serde(default)]
    pub mood: Option<String>,

    #[serde(default)]
    pub subtitle: Option<String>,
}

impl ContentEntry {
    /// `excerpt`, falling back to `summary`.
    pub fn excerpt(&self) -> &str {
        self.excerpt
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or_default()
    }

    /// Date shown to readers: `dateFormatted`, else the raw date reformatted.
    pub fn display_date(&self) -> String {
        self.date_formatted
            .clone()
            .or_else(|| self.date.as_deref().and_then(date::display))
            .unwrap_or_default()
    }

    /// Whether two records denote the same entry.
    ///
    /// URLs are unique per collection while `slug` may be missing, so
    /// identity is decided by URL.
    #[inline]
    pub fn same_entry(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
