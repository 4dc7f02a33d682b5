//! Table of contents for the overlay sidebar.
//!
//! Second and third level headings of the post body become TOC entries.
//! Headings without an `id` get `heading-<n>`, `n` being the heading's
//! position among all collected headings.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::utils::html;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h([23])(\s[^>]*)?>(.*?)</h[23]\s*>").expect("valid heading regex")
});

static ID_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sid\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid id regex")
});

/// Distance from the top of the scroll container below which a heading
/// counts as reached.
pub const ACTIVE_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    /// 2 or 3
    pub level: u8,
}

/// Post body with heading ids filled in, plus its headings.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    pub markup: String,
    pub entries: Vec<TocEntry>,
}

/// Collect `<h2>`/`<h3>` headings and make sure each has an id.
pub fn outline(content: &str) -> Outline {
    let mut entries = Vec::new();

    let markup = HEADING.replace_all(content, |caps: &Captures<'_>| {
        let index = entries.len();
        let level = if &caps[1] == "2" { 2 } else { 3 };
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        let inner = &caps[3];

        let existing = ID_ATTR
            .captures(attrs)
            .and_then(|id| id.get(1).or_else(|| id.get(2)))
            .map(|m| m.as_str())
            .filter(|id| !id.is_empty());

        let (id, attrs) = match existing {
            Some(id) => (id.to_owned(), Cow::Borrowed(attrs)),
            None => {
                let id = format!("heading-{index}");
                let attrs = Cow::Owned(format!(" id=\"{id}\"{attrs}"));
                (id, attrs)
            }
        };

        entries.push(TocEntry {
            id,
            text: html::text_of(inner),
            level,
        });

        format!("<h{level}{attrs}>{inner}</h{level}>")
    });

    Outline {
        markup: markup.into_owned(),
        entries,
    }
}

/// `<ul>` of links for the sidebar, empty when there are no headings.
pub fn render_list(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::from("<ul>");
    for entry in entries {
        let _ = write!(
            out,
            r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
            entry.level,
            html::escape(&entry.id),
            html::escape(&entry.text),
        );
    }
    out.push_str("</ul>");
    out
}

/// Index of the heading the reader is in.
///
/// `offsets` are heading tops relative to the scroll container, in document
/// order. The last heading at or above `threshold` wins; 0 when none is.
pub fn active_heading(offsets: &[f64], threshold: f64) -> usize {
    offsets
        .iter()
        .rposition(|&top| top <= threshold)
        .unwrap_or(0)
}
