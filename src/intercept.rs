//! Delegated click decisions.
//!
//! The browser binding turns a click into a [`ClickInfo`] snapshot; [`decide`]
//! says whether the controller takes over. Anything it does not recognize is
//! left to the browser.

use crate::config::RoutesConfig;
use crate::utils::link::{self, LinkKind};
use crate::utils::slug;

/// Primary mouse button as reported by `MouseEvent.button`.
pub const PRIMARY_BUTTON: i16 = 0;

/// Built-in controls that handle clicks themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayControl {
    /// `.post-overlay-close`
    Close,
    /// `.post-overlay-backdrop`
    Backdrop,
    /// `.overlay-site-title`
    SiteTitle,
    /// `.back-to-home-btn` (passive mode only)
    BackToHome,
}

impl OverlayControl {
    /// Selectors checked, in order, against the click target.
    pub const ALL: [(&'static str, Self); 4] = [
        (".post-overlay-close", Self::Close),
        (".post-overlay-backdrop", Self::Backdrop),
        (".overlay-site-title", Self::SiteTitle),
        (".back-to-home-btn", Self::BackToHome),
    ];
}

/// Everything the decision needs to know about one click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickInfo {
    /// Raw `href` of the closest enclosing anchor.
    pub href: Option<String>,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub button: i16,
    /// Control the click landed in, if any.
    pub control: Option<OverlayControl>,
    /// The anchor carries `data-spa-link` (related posts, prev/next).
    pub spa_link: bool,
}

impl ClickInfo {
    /// Plain primary click on an anchor.
    pub fn link(href: &str) -> Self {
        Self {
            href: Some(href.to_owned()),
            ..Default::default()
        }
    }

    pub fn control(control: OverlayControl) -> Self {
        Self {
            control: Some(control),
            ..Default::default()
        }
    }

    /// Modifier held or non-primary button: the user wants a new tab or window.
    pub const fn is_modified(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.button != PRIMARY_BUTTON
    }
}

/// What to do with a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Let the browser handle it.
    Native,
    Post(String),
    Page(String),
    /// Close the overlay.
    Home,
    /// Full page navigation to the given URL.
    Navigate(String),
    /// Scroll to the element with this id, without touching the URL.
    ScrollTo(String),
}

impl LinkAction {
    /// Whether the browser default must be prevented.
    pub const fn is_handled(&self) -> bool {
        !matches!(self, Self::Native)
    }
}

/// Decide what an interactive-mode click does.
///
/// `is_page_url` answers whether an href names a loaded page.
pub fn decide(
    click: &ClickInfo,
    routes: &RoutesConfig,
    is_page_url: impl Fn(&str) -> bool,
) -> LinkAction {
    match click.control {
        Some(OverlayControl::Close | OverlayControl::Backdrop | OverlayControl::SiteTitle) => {
            return LinkAction::Home;
        }
        Some(OverlayControl::BackToHome) => return LinkAction::Navigate("/".to_owned()),
        None => {}
    }

    let Some(href) = click.href.as_deref().map(str::trim) else {
        return LinkAction::Native;
    };

    if click.spa_link
        && let Some(slug) = slug::post_slug_from_href(href, &routes.post_prefix)
    {
        return LinkAction::Post(slug);
    }

    if click.is_modified() {
        return LinkAction::Native;
    }

    match link::classify(href) {
        LinkKind::Fragment => {
            return match fragment_id(href) {
                Some(id) => LinkAction::ScrollTo(id),
                None => LinkAction::Native,
            };
        }
        LinkKind::Empty | LinkKind::External => return LinkAction::Native,
        LinkKind::Absolute | LinkKind::Relative => {}
    }

    if href.starts_with(&routes.post_prefix) {
        return match slug::post_slug_from_href(href, &routes.post_prefix) {
            Some(slug) => LinkAction::Post(slug),
            None => LinkAction::Native,
        };
    }

    if is_page_url(href) {
        return LinkAction::Page(slug::page_slug_from_href(href));
    }

    LinkAction::Native
}

/// Target id of a `#fragment` href, percent-decoded. `None` for a bare `#`.
fn fragment_id(href: &str) -> Option<String> {
    let raw = href.strip_prefix('#')?;
    if raw.is_empty() {
        return None;
    }
    let id = urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |id| id.into_owned());
    Some(id)
}
