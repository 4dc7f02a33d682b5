//! Summary card appended by the "load more" list.

use std::fmt::Write;

use super::reading_icons;
use crate::index::ContentEntry;
use crate::utils::html::escape;

/// Markup of one `<article class="post-item">` card.
pub fn card(post: &ContentEntry) -> String {
    let url = escape(&post.url);
    let mut out = String::with_capacity(1024);

    let _ = write!(
        out,
        r#"<article class="post-item{}"><div class="post-content">"#,
        if post.featured { " featured" } else { "" },
    );
    let _ = write!(
        out,
        concat!(
            r#"<div class="post-header-inline">"#,
            r#"<h2 class="post-title-vaporwave"><a href="{url}">{title}</a></h2>"#,
            "</div>",
            r#"<div class="post-date-with-badges">"#,
            r#"<span class="post-date">{date}</span>"#,
        ),
        url = url,
        title = escape(&post.title),
        date = escape(&post.display_date()),
    );
    if post.featured {
        out.push_str(r#"<span class="featured-badge">✨ Featured</span>"#);
    }
    if let Some(mood) = post.mood.as_deref().filter(|m| !m.is_empty()) {
        let _ = write!(out, r#"<span class="post-mood">{}</span>"#, escape(mood));
    }
    out.push_str("</div>");

    if let Some(subtitle) = post.subtitle.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(out, r#"<p class="post-list-subtitle">{}</p>"#, escape(subtitle));
    }

    let _ = write!(
        out,
        r#"<p class="post-excerpt-vaporwave">{}</p>"#,
        escape(post.excerpt())
    );

    if !post.tags.is_empty() {
        out.push_str(r#"<div class="post-tags-vaporwave">"#);
        for tag in &post.tags {
            let _ = write!(out, r#"<span class="post-tag-vaporwave">{}</span>"#, escape(tag));
        }
        out.push_str("</div>");
    }

    let _ = write!(
        out,
        concat!(
            r#"<a href="{url}" class="continue-reading-vaporwave">Read More →</a>"#,
            "</div>",
            r#"<div class="post-meta-sidebar"><div class="reading-time-vaporwave">"#,
            r#"<span class="coffee-cups">{icons}<span>{minutes} min</span></span>"#,
            "</div></div>",
            "</article>",
        ),
        url = url,
        icons = reading_icons(post.reading_time),
        minutes = post.reading_time,
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_card() {
        let post = ContentEntry {
            url: "/blog/hello/".into(),
            title: "Hello".into(),
            excerpt: Some("First <post>".into()),
            tags: vec!["rust".into(), "wasm".into()],
            featured: true,
            mood: Some("chill".into()),
            reading_time: 12,
            date_formatted: Some("March 1, 2024".into()),
            ..Default::default()
        };
        let markup = card(&post);

        assert!(markup.starts_with(r#"<article class="post-item featured">"#));
        assert!(markup.contains(r#"<a href="/blog/hello/">Hello</a>"#));
        assert!(markup.contains("March 1, 2024"));
        assert!(markup.contains("✨ Featured"));
        assert!(markup.contains(r#"<span class="post-mood">chill</span>"#));
        assert!(markup.contains("First &lt;post&gt;"));
        assert!(markup.contains(r#"<span class="post-tag-vaporwave">wasm</span>"#));
        assert!(markup.contains("Read More →"));
        assert!(markup.contains("📚📚📚📚<span>12 min</span>"));
        assert!(markup.ends_with("</article>"));
    }

    #[test]
    fn test_plain_card() {
        let post = ContentEntry {
            url: "/blog/plain/".into(),
            title: "Plain".into(),
            summary: Some("From summary".into()),
            ..Default::default()
        };
        let markup = card(&post);

        assert!(markup.starts_with(r#"<article class="post-item">"#));
        assert!(!markup.contains("featured-badge"));
        assert!(!markup.contains("post-mood"));
        assert!(!markup.contains("post-tags-vaporwave"));
        assert!(markup.contains("From summary"));
        assert!(markup.contains("📚<span>0 min</span>"));
    }
}
