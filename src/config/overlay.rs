//! `[overlay]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[overlay]` section - overlay header and animation timing.
///
/// # Example
/// ```toml
/// [overlay]
/// site_title = "LofiCode"
/// exit_delay_ms = 300
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    /// Element whose text becomes the overlay header title.
    #[serde(default = "defaults::overlay::title_selector")]
    #[educe(Default = defaults::overlay::title_selector())]
    pub title_selector: String,

    /// Header title used when `title_selector` matches nothing.
    #[serde(default = "defaults::overlay::site_title")]
    #[educe(Default = defaults::overlay::site_title())]
    pub site_title: String,

    /// Delay between mount and collaborator re-decoration.
    #[serde(default = "defaults::overlay::decorate_delay_ms")]
    #[educe(Default = defaults::overlay::decorate_delay_ms())]
    pub decorate_delay_ms: u32,

    /// Exit animation length before the overlay node is removed.
    #[serde(default = "defaults::overlay::exit_delay_ms")]
    #[educe(Default = defaults::overlay::exit_delay_ms())]
    pub exit_delay_ms: u32,
}
