//! Classification of `href` values.

/// What kind of target an `href` points at.
///
/// | Prefix | Kind |
/// |--------|------|
/// | (empty) | `Empty` |
/// | `#` | `Fragment` |
/// | `//` | `External` (protocol-relative) |
/// | `https:`, `mailto:` | `External` |
/// | `/` | `Absolute` |
/// | anything else | `Relative` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Empty,
    Fragment,
    External,
    Absolute,
    Relative,
}

/// Classify a raw `href` attribute value.
pub fn classify(href: &str) -> LinkKind {
    let href = href.trim();
    match href.as_bytes() {
        [] => LinkKind::Empty,
        [b'#', ..] => LinkKind::Fragment,
        [b'/', b'/', ..] => LinkKind::External,
        [b'/', ..] => LinkKind::Absolute,
        _ if is_external_link(href) => LinkKind::External,
        _ => LinkKind::Relative,
    }
}

/// Check if a link is external (has a scheme like http:, mailto:, etc.)
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Path part of an href, without query string or fragment.
///
/// `/blog/a/?ref=rss#intro` → `/blog/a/`
#[inline]
pub fn path_of(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    &href[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(""), LinkKind::Empty);
        assert_eq!(classify("   "), LinkKind::Empty);
        assert_eq!(classify("#intro"), LinkKind::Fragment);
        assert_eq!(classify("//cdn.example.com/x.js"), LinkKind::External);
        assert_eq!(classify("https://example.com"), LinkKind::External);
        assert_eq!(classify("mailto:alice@example.com"), LinkKind::External);
        assert_eq!(classify("/blog/hello/"), LinkKind::Absolute);
        assert_eq!(classify("about/"), LinkKind::Relative);
    }

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("http://example.com"));
        assert!(is_external_link("git+ssh://host/repo"));
        assert!(!is_external_link("/blog/a:b/"));
        assert!(!is_external_link(":nothing"));
        assert!(!is_external_link("plain"));
    }

    #[test]
    fn test_path_of() {
        assert_eq!(path_of("/blog/a/?ref=rss#intro"), "/blog/a/");
        assert_eq!(path_of("/about#team"), "/about");
        assert_eq!(path_of("/about/"), "/about/");
    }
}
