//! SPA configuration.
//!
//! Every field has a default matching the loficode theme, so an empty
//! document is a valid configuration. Pages may override values with an
//! inline TOML block.
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[index]`    | Posts/pages JSON endpoints                     |
//! | `[routes]`   | Post prefix, post page marker, tag prefix      |
//! | `[overlay]`  | Header title, enter/exit timing                |
//! | `[list]`     | "Load more" batch size, stagger, selectors     |
//! | `[search]`   | Debounce, excerpt length                       |
//!
//! # Example
//!
//! ```toml
//! [index]
//! posts = "/index.json"
//!
//! [routes]
//! post_prefix = "/blog/"
//!
//! [overlay]
//! site_title = "LofiCode"
//!
//! [list]
//! batch_size = 3
//! ```

pub mod defaults;
mod error;
mod index;
mod list;
mod overlay;
mod routes;
mod search;

pub use error::ConfigError;
pub use index::IndexConfig;
pub use list::ListConfig;
pub use overlay::OverlayConfig;
pub use routes::RoutesConfig;
pub use search::SearchConfig;

use educe::Educe;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SpaConfig {
    /// Content index endpoints
    #[serde(default)]
    pub index: IndexConfig,

    /// URL scheme
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Overlay header and timing
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Incremental post list
    #[serde(default)]
    pub list: ListConfig,

    /// In-page search
    #[serde(default)]
    pub search: SearchConfig,
}

impl SpaConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SpaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.routes.post_prefix;
        if prefix.len() < 3 || !prefix.starts_with('/') || !prefix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "[routes.post_prefix] must look like `/blog/`, got `{prefix}`"
            )));
        }

        if self.list.batch_size == 0 {
            return Err(ConfigError::Validation(
                "[list.batch_size] must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
