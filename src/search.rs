//! In-page search over the post index.
//!
//! Matching is a case-insensitive substring test on the title, the excerpt
//! and every tag. Results render as a list of `.search-result-item`
//! elements carrying their target in `data-url`; the browser binding routes
//! clicks on them through [`Spa::open_search_result`](crate::spa::Spa::open_search_result).

use std::fmt::Write;

use regex::RegexBuilder;

use crate::index::ContentEntry;
use crate::utils::html::escape;

/// Outcome of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    /// Blank query: results area emptied.
    Cleared,
    /// Markup for the results area; `count` may be 0.
    Rendered { markup: String, count: usize },
}

/// Entries matching `query`, in index order. Blank queries match nothing.
pub fn search<'a>(entries: &'a [ContentEntry], query: &str) -> Vec<&'a ContentEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let contains = |text: &str| text.to_lowercase().contains(&query);
    entries
        .iter()
        .filter(|entry| {
            contains(&entry.title)
                || contains(entry.excerpt())
                || entry.tags.iter().any(|tag| contains(tag))
        })
        .collect()
}

/// Escape `text` and wrap every case-insensitive occurrence of `query` in `<mark>`.
pub fn highlight(text: &str, query: &str) -> String {
    let query = query.trim();
    let pattern = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build();
    let re = match pattern {
        Ok(re) if !query.is_empty() => re,
        _ => return escape(text).into_owned(),
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&escape(&text[last..m.start()]));
        let _ = write!(out, "<mark>{}</mark>", escape(m.as_str()));
        last = m.end();
    }
    out.push_str(&escape(&text[last..]));
    out
}

/// Cut `text` to at most `max` characters, adding `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_owned(),
        Some((end, _)) => format!("{}...", text[..end].trim()),
    }
}

/// Results list, or the "no article" message when `results` is empty.
pub fn render_results(results: &[&ContentEntry], query: &str, excerpt_len: usize) -> String {
    if results.is_empty() {
        return format!(
            r#"<div class="search-no-results">No article found for "{}". Try different keywords or browse by tags.</div>"#,
            escape(query.trim())
        );
    }

    let mut out = String::new();
    for entry in results {
        let _ = write!(
            out,
            concat!(
                r#"<div class="search-result-item" data-url="{url}">"#,
                r#"<div class="search-result-title">{title}</div>"#,
                r#"<div class="search-result-excerpt">{excerpt}</div>"#,
                r#"<div class="search-result-meta"><span>{date}</span><span>{tags}</span></div>"#,
                "</div>",
            ),
            url = escape(&entry.url),
            title = highlight(&entry.title, query),
            excerpt = highlight(&truncate(entry.excerpt(), excerpt_len), query),
            date = escape(&entry.display_date()),
            tags = escape(&entry.tags.join(", ")),
        );
    }
    out
}

/// Search and render in one go.
pub fn run(entries: &[ContentEntry], query: &str, excerpt_len: usize) -> SearchView {
    if query.trim().is_empty() {
        return SearchView::Cleared;
    }
    let results = search(entries, query);
    SearchView::Rendered {
        markup: render_results(&results, query, excerpt_len),
        count: results.len(),
    }
}
