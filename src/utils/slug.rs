//! Slug extraction and tolerant entry lookup.
//!
//! Index entries do not always carry a `slug`. Lookups therefore try an
//! ordered list of matchers and stop at the first entry any matcher accepts:
//!
//! | Matcher | Compares the slug with |
//! |---------|------------------------|
//! | [`exact_slug`] | the entry's `slug` field |
//! | [`url_path`] | the whole URL path, slashes trimmed |
//! | [`url_segment`] | the last non-empty URL segment |
//! | [`file_stem`] | the last URL segment without its extension |

use std::borrow::Cow;

use super::link::path_of;
use crate::index::ContentEntry;

/// A single lookup rule.
pub type SlugMatcher = fn(&ContentEntry, &str) -> bool;

/// Matchers for posts, in priority order.
pub const POST_MATCHERS: &[SlugMatcher] = &[exact_slug, url_segment, file_stem];

/// Matchers for pages, in priority order.
pub const PAGE_MATCHERS: &[SlugMatcher] = &[exact_slug, url_path, url_segment, file_stem];

// ============================================================================
// Matchers
// ============================================================================

pub fn exact_slug(entry: &ContentEntry, slug: &str) -> bool {
    entry.slug.as_deref() == Some(slug)
}

/// `/talks/rust-2024/` matches `talks/rust-2024`.
pub fn url_path(entry: &ContentEntry, slug: &str) -> bool {
    let path = path_of(&entry.url).trim_matches('/');
    !path.is_empty() && path == slug.trim_matches('/')
}

/// `/blog/my-post/` matches `my-post`.
pub fn url_segment(entry: &ContentEntry, slug: &str) -> bool {
    last_segment(&entry.url).is_some_and(|segment| segment == slug)
}

/// `/blog/my-post.html` matches `my-post` and `my-post/`.
pub fn file_stem(entry: &ContentEntry, slug: &str) -> bool {
    let Some(segment) = last_segment(&entry.url) else {
        return false;
    };
    let stem = segment
        .rsplit_once('.')
        .map_or(segment, |(stem, _)| stem);
    !stem.is_empty() && stem == slug.trim_end_matches('/')
}

fn last_segment(url: &str) -> Option<&str> {
    path_of(url).split('/').rev().find(|s| !s.is_empty())
}

/// First entry accepted by the earliest matcher.
///
/// Matchers are tried one at a time over the whole collection, so an exact
/// slug match always wins over a URL match on an earlier entry.
pub fn find_entry<'a>(
    entries: &'a [ContentEntry],
    slug: &str,
    matchers: &[SlugMatcher],
) -> Option<&'a ContentEntry> {
    if slug.is_empty() {
        return None;
    }
    matchers
        .iter()
        .find_map(|matches| entries.iter().find(|entry| matches(entry, slug)))
}

// ============================================================================
// Href → slug
// ============================================================================

/// Slug of a post link, or `None` if `href` is not under `prefix`.
///
/// `/blog/hello%20world/?ref=rss` → `hello world`
pub fn post_slug_from_href(href: &str, prefix: &str) -> Option<String> {
    let rest = path_of(href).strip_prefix(prefix)?;
    let raw = rest.trim_matches('/');
    if raw.is_empty() {
        return None;
    }
    let slug = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
    Some(slug.into_owned())
}

/// Slug of a page link: the path with surrounding slashes trimmed.
pub fn page_slug_from_href(href: &str) -> String {
    path_of(href).trim_matches('/').to_owned()
}

// ============================================================================
// Tests
// ============================================================================
