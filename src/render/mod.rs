//! Markup builders and the views derived from the index on every render.
//!
//! Nothing here touches the document. Builders return HTML strings that the
//! controller hands to the [`Host`](crate::host::Host). Text fields from the
//! index are escaped; `content` is pre-rendered by the site generator and
//! inserted as is.

pub mod card;
pub mod overlay;
pub mod related;
pub mod toc;

/// Icon repeated to visualize reading time.
pub const READING_ICON: &str = "📚";

/// Upper bound on reading-time icons.
const MAX_READING_ICONS: u32 = 5;

/// One icon per three minutes of reading, between 1 and 5.
///
/// Used by the overlay, the related posts panel and the list cards alike.
pub fn reading_icon_count(minutes: u32) -> usize {
    minutes.div_ceil(3).clamp(1, MAX_READING_ICONS) as usize
}

pub fn reading_icons(minutes: u32) -> String {
    READING_ICON.repeat(reading_icon_count(minutes))
}
