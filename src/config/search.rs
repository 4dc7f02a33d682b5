//! `[search]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[search]` section - in-page search behavior.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before searching.
    #[serde(default = "defaults::search::debounce_ms")]
    #[educe(Default = defaults::search::debounce_ms())]
    pub debounce_ms: u32,

    /// Maximum excerpt length in a result item, in characters.
    #[serde(default = "defaults::search::excerpt_len")]
    #[educe(Default = defaults::search::excerpt_len())]
    pub excerpt_len: usize,
}
