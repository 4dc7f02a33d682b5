//! Markup helpers shared by the renderers.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Escape text for use in element content or a double-quoted attribute.
#[inline]
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Plain text of a markup fragment: tags removed, entities decoded when
/// possible, whitespace runs collapsed.
pub fn text_of(markup: &str) -> String {
    let stripped = TAG.replace_all(markup, "");
    let decoded = quick_xml::escape::unescape(&stripped)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| stripped.into_owned());
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
