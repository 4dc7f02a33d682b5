//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [index] Section Defaults
// ============================================================================

pub mod index {
    pub fn posts() -> String {
        "/index.json".into()
    }

    pub fn pages() -> String {
        "/talks/pages.json".into()
    }
}

// ============================================================================
// [routes] Section Defaults
// ============================================================================

pub mod routes {
    pub fn post_prefix() -> String {
        "/blog/".into()
    }

    pub fn content_region() -> String {
        ".post-layout .post-content .post-body".into()
    }

    pub fn tag_prefix() -> String {
        "/tags/".into()
    }
}

// ============================================================================
// [overlay] Section Defaults
// ============================================================================

pub mod overlay {
    pub fn title_selector() -> String {
        ".logo".into()
    }

    pub fn site_title() -> String {
        "LofiCode".into()
    }

    pub fn decorate_delay_ms() -> u32 {
        100
    }

    pub fn exit_delay_ms() -> u32 {
        300
    }
}

// ============================================================================
// [list] Section Defaults
// ============================================================================

pub mod list {
    pub fn batch_size() -> usize {
        3
    }

    pub fn stagger_ms() -> u32 {
        100
    }

    pub fn container() -> String {
        "#posts-container".into()
    }

    pub fn trigger() -> String {
        "#load-more-btn".into()
    }

    pub fn failure_label() -> String {
        "Error loading posts".into()
    }
}

// ============================================================================
// [search] Section Defaults
// ============================================================================

pub mod search {
    pub fn debounce_ms() -> u32 {
        300
    }

    pub fn excerpt_len() -> usize {
        120
    }
}
