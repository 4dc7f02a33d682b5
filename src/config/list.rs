//! `[list]` section configuration.
//!
//! Controls the "load more" post list on the home page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[list]` section - incremental post list loading.
///
/// # Example
/// ```toml
/// [list]
/// batch_size = 3
/// stagger_ms = 100
/// container = "#posts-container"
/// trigger = "#load-more-btn"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    /// Entries appended per trigger.
    #[serde(default = "defaults::list::batch_size")]
    #[educe(Default = defaults::list::batch_size())]
    pub batch_size: usize,

    /// Pause between two appended cards.
    #[serde(default = "defaults::list::stagger_ms")]
    #[educe(Default = defaults::list::stagger_ms())]
    pub stagger_ms: u32,

    /// Selector of the element cards are appended to.
    #[serde(default = "defaults::list::container")]
    #[educe(Default = defaults::list::container())]
    pub container: String,

    /// Selector of the "load more" control carrying `data-loaded`/`data-total`.
    #[serde(default = "defaults::list::trigger")]
    #[educe(Default = defaults::list::trigger())]
    pub trigger: String,

    /// Label shown on the trigger after a failed load.
    #[serde(default = "defaults::list::failure_label")]
    #[educe(Default = defaults::list::failure_label())]
    pub failure_label: String,
}

#[cfg(test)]
mod tests {
    use super::super::SpaConfig;

    #[test]
    fn test_list_config_defaults() {
        let config: SpaConfig = toml::from_str("").unwrap();

        assert_eq!(config.list.batch_size, 3);
        assert_eq!(config.list.stagger_ms, 100);
        assert_eq!(config.list.container, "#posts-container");
        assert_eq!(config.list.failure_label, "Error loading posts");
    }
}
