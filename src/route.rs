//! Per-page-load session mode.
//!
//! A document is either the SPA shell (home, listings, tags) or a real
//! server-rendered post. The decision is taken once, when the controller
//! starts, and never revisited.

use crate::config::RoutesConfig;

/// How the controller behaves for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Links are intercepted and rendered in overlays.
    #[default]
    Interactive,
    /// A real post is on screen; navigation stays native.
    Passive,
}

impl SessionMode {
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Passive)
    }
}

/// Passive iff the post content region is present and the path is a post path.
pub fn classify(pathname: &str, has_content_region: bool, routes: &RoutesConfig) -> SessionMode {
    if has_content_region && pathname.starts_with(&routes.post_prefix) {
        SessionMode::Passive
    } else {
        SessionMode::Interactive
    }
}

/// Selector of the floating "back to home" control.
pub const BACK_TO_HOME_SELECTOR: &str = ".back-to-home-btn";

/// Markup of the floating "back to home" control injected in passive mode.
pub const BACK_TO_HOME_MARKUP: &str = concat!(
    r#"<button class="back-to-home-btn" title="Back to Home" aria-label="Back to Home">"#,
    r#"<i class="fas fa-times"></i>"#,
    "</button>",
);
