//! Overlay markup.
//!
//! The host wraps the returned markup in the overlay root element
//! (`.post-overlay[data-overlay-id]`), so builders only produce its children.

use std::fmt::Write;

use super::related::{self, Adjacent};
use super::{reading_icons, toc};
use crate::config::RoutesConfig;
use crate::index::ContentEntry;
use crate::utils::html::escape;

/// Backdrop and header shared by post and page overlays.
fn chrome(out: &mut String, site_title: &str, close_label: &str) {
    let _ = write!(
        out,
        concat!(
            r#"<div class="post-overlay-backdrop"></div>"#,
            r#"<div class="post-overlay-content">"#,
            r#"<div class="post-overlay-header">"#,
            r#"<div class="post-overlay-title">"#,
            r#"<a href="/" class="overlay-site-title">{}</a>"#,
            "</div>",
            r#"<button class="post-overlay-close" aria-label="{}">"#,
            r#"<i class="fas fa-times"></i>"#,
            "</button>",
            "</div>",
        ),
        escape(site_title),
        close_label,
    );
}

/// Full overlay for a post: header, meta, body, related posts,
/// previous/next navigation and the sidebar TOC.
pub fn post(
    entry: &ContentEntry,
    posts: &[ContentEntry],
    site_title: &str,
    routes: &RoutesConfig,
) -> String {
    let outline = toc::outline(&entry.content);
    let mut out = String::with_capacity(entry.content.len() + 2048);

    chrome(&mut out, site_title, "Close post");
    out.push_str(r#"<div class="post-layout"><article class="post-content">"#);

    // Header
    let _ = write!(
        out,
        concat!(
            r#"<header class="post-header">"#,
            r#"<div class="post-meta">"#,
            r#"<span class="post-date">{date}</span>"#,
            r#"<div class="reading-time-post">"#,
            r#"<span class="coffee-cups">{icons}</span>"#,
            "<span>{minutes} min read</span>",
            "</div>",
            "</div>",
            r#"<h1 class="post-title">{title}</h1>"#,
        ),
        date = escape(&entry.display_date()),
        icons = reading_icons(entry.reading_time),
        minutes = entry.reading_time,
        title = escape(&entry.title),
    );
    if let Some(subtitle) = entry.subtitle.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(out, r#"<p class="post-subtitle">{}</p>"#, escape(subtitle));
    }
    if !entry.tags.is_empty() {
        out.push_str(r#"<div class="post-tags-header">"#);
        for tag in &entry.tags {
            let _ = write!(
                out,
                r#"<a href="{}" class="post-tag">{}</a>"#,
                escape(&routes.tag_url(tag)),
                escape(tag),
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</header>");

    let _ = write!(out, r#"<div class="post-body">{}</div>"#, outline.markup);

    related_panel(&mut out, &related::related_posts(entry, posts));
    navigation(&mut out, related::prev_next(entry, posts));

    out.push_str("</article>");

    let _ = write!(
        out,
        concat!(
            r#"<aside class="sidebar">"#,
            r#"<nav class="toc">"#,
            "<h4>Contents</h4>",
            r#"<div id="toc-content">{}</div>"#,
            "</nav>",
            "</aside>",
        ),
        toc::render_list(&outline.entries),
    );

    out.push_str("</div></div>");
    out
}

/// Overlay for a standalone page: header and body only.
pub fn page(entry: &ContentEntry, site_title: &str) -> String {
    let mut out = String::with_capacity(entry.content.len() + 1024);

    chrome(&mut out, site_title, "Close page");
    let _ = write!(
        out,
        concat!(
            r#"<div class="post-layout"><article class="post-content">"#,
            r#"<header class="post-header"><h1 class="post-title">{}</h1></header>"#,
            r#"<div class="post-body">{}</div>"#,
            "</article></div>",
            "</div>",
        ),
        escape(&entry.title),
        entry.content,
    );
    out
}

fn related_panel(out: &mut String, related: &[&ContentEntry]) {
    if related.is_empty() {
        return;
    }

    out.push_str(r#"<div class="related-posts"><h3>Related Content</h3><div class="related-grid">"#);
    for post in related {
        let _ = write!(
            out,
            concat!(
                r#"<div class="related-post">"#,
                r#"<h4><a href="{url}" data-spa-link>{title}</a></h4>"#,
                r#"<div class="related-meta">{date} • {icons} {minutes} min read</div>"#,
                "</div>",
            ),
            url = escape(&post.url),
            title = escape(&post.title),
            date = escape(&post.display_date()),
            icons = reading_icons(post.reading_time),
            minutes = post.reading_time,
        );
    }
    out.push_str("</div></div>");
}

fn navigation(out: &mut String, adjacent: Adjacent<'_>) {
    if adjacent.is_empty() {
        return;
    }

    out.push_str(r#"<nav class="post-navigation">"#);
    for (post, class, label) in [
        (adjacent.prev, "nav-previous", "← Previous"),
        (adjacent.next, "nav-next", "Next →"),
    ] {
        match post {
            Some(post) => {
                let _ = write!(
                    out,
                    concat!(
                        r#"<div class="{class}">"#,
                        r#"<span class="nav-label">{label}</span>"#,
                        r#"<a href="{url}" data-spa-link class="nav-title">{title}</a>"#,
                        "</div>",
                    ),
                    class = class,
                    label = label,
                    url = escape(&post.url),
                    title = escape(&post.title),
                );
            }
            // Keeps "Next" in the right-hand column
            None => out.push_str("<div></div>"),
        }
    }
    out.push_str("</nav>");
}
