//! Related posts and previous/next neighbours.
//!
//! Both views are recomputed for every overlay render; the index is small and
//! immutable, so there is nothing worth caching.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::index::ContentEntry;
use crate::utils::date;

/// Maximum number of related posts shown.
pub const MAX_RELATED: usize = 3;

/// Posts sharing the most tags with `current`, best first.
///
/// The current entry is excluded, posts sharing no tag are dropped and ties
/// keep index order.
pub fn related_posts<'a>(
    current: &ContentEntry,
    posts: &'a [ContentEntry],
) -> SmallVec<[&'a ContentEntry; MAX_RELATED]> {
    if current.tags.is_empty() {
        return SmallVec::new();
    }

    let tags: FxHashSet<&str> = current.tags.iter().map(String::as_str).collect();

    let mut scored: Vec<(usize, &ContentEntry)> = posts
        .iter()
        .filter(|post| !post.same_entry(current))
        .map(|post| {
            let shared = post
                .tags
                .iter()
                .filter(|tag| tags.contains(tag.as_str()))
                .count();
            (shared, post)
        })
        .filter(|(shared, _)| *shared > 0)
        .collect();

    // `sort_by` is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_RELATED)
        .map(|(_, post)| post)
        .collect()
}

/// Neighbours of a post in newest-first order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adjacent<'a> {
    /// The next newer post.
    pub prev: Option<&'a ContentEntry>,
    /// The next older post.
    pub next: Option<&'a ContentEntry>,
}

impl Adjacent<'_> {
    pub const fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

/// Previous (newer) and next (older) posts around `current`.
///
/// Posts without a parseable date sort last. If `current` is not in `posts`
/// both sides are empty.
pub fn prev_next<'a>(current: &ContentEntry, posts: &'a [ContentEntry]) -> Adjacent<'a> {
    let mut sorted: Vec<&ContentEntry> = posts.iter().collect();
    sorted.sort_by(|a, b| date::newest_first(a.date.as_deref(), b.date.as_deref()));

    let Some(index) = sorted.iter().position(|post| post.same_entry(current)) else {
        return Adjacent::default();
    };

    Adjacent {
        prev: index.checked_sub(1).map(|i| sorted[i]),
        next: sorted.get(index + 1).copied(),
    }
}
