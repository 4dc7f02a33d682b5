//! The boundary between the navigation core and the document it runs in.
//!
//! Everything that touches the DOM, the history stack, the network or a
//! timer goes through [`Host`]. The browser binding implements it with
//! `web-sys`; tests use an in-memory recorder.
//!
//! Async methods are cooperative suspension points of a single-threaded
//! event loop, so the trait carries no `Send` bounds.

use std::fmt;

use crate::navigation::HistoryEntry;

/// Identity of one mounted overlay.
///
/// Ids grow monotonically, so a deferred removal aimed at an old overlay
/// never touches a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

impl OverlayId {
    /// Selector matching this overlay's root element.
    pub fn selector(self) -> String {
        format!(".post-overlay[data-overlay-id=\"{}\"]", self.0)
    }

    /// Selector of the rendered body inside this overlay.
    pub fn body_selector(self) -> String {
        format!("{} .post-body", self.selector())
    }

    /// Selector of this overlay's scroll container.
    pub fn content_selector(self) -> String {
        format!("{} .post-overlay-content", self.selector())
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Visible state of the "load more" control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerState {
    /// Hidden, loading indicator shown.
    Loading,
    /// Shown, ready for another batch.
    Ready,
    /// Hidden for good, every entry is loaded.
    Exhausted,
    /// Shown with a failure label.
    Failed(String),
}

/// A raw HTTP response.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Decoration owned by other scripts, re-run after content is swapped in.
pub trait Collaborators {
    /// Re-apply syntax highlighting and copy buttons inside `scope`.
    /// Must be idempotent.
    fn decorate_code_blocks(&self, scope: &str);

    /// Attach table-of-contents behavior (scroll spy) inside `scope`.
    fn build_toc(&self, scope: &str);
}

/// Document, history, network and timers.
#[allow(async_fn_in_trait)]
pub trait Host: Collaborators {
    // ------------------------------------------------------------------
    // Document
    // ------------------------------------------------------------------

    /// Path of the current location, e.g. `/blog/hello/`.
    fn pathname(&self) -> String;

    /// Whether any element matches `selector`.
    fn exists(&self, selector: &str) -> bool;

    /// Text content of the first element matching `selector`.
    fn text_content(&self, selector: &str) -> Option<String>;

    /// `data-<name>` attribute of the first element matching `selector`.
    fn data_attribute(&self, selector: &str, name: &str) -> Option<String>;

    /// Append markup as the last children of the first match of `selector`.
    fn append_html(&self, selector: &str, markup: &str) -> anyhow::Result<()>;

    /// Full page navigation.
    fn navigate(&self, url: &str);

    // ------------------------------------------------------------------
    // Overlay
    // ------------------------------------------------------------------

    /// Append an overlay root to the body. `markup` is the overlay's inner HTML.
    fn mount_overlay(&self, id: OverlayId, markup: &str) -> anyhow::Result<()>;

    /// Toggle the `active` class that drives enter/exit animations.
    fn set_overlay_active(&self, id: OverlayId, active: bool) -> anyhow::Result<()>;

    /// Detach an overlay. Removing an absent overlay is not an error.
    fn remove_overlay(&self, id: OverlayId) -> anyhow::Result<()>;

    /// Scroll to the element whose id is `target`. Inside an overlay its
    /// content scrolls, keeping the target clear of the overlay header;
    /// otherwise the document scrolls. A missing target is not an error.
    fn scroll_to(&self, overlay: Option<OverlayId>, target: &str) -> anyhow::Result<()>;

    /// Tops of the overlay's body headings relative to its scroll container,
    /// in document order.
    fn heading_offsets(&self, id: OverlayId) -> Vec<f64>;

    /// Mark the `index`-th sidebar TOC link active and clear the others.
    fn set_active_toc_link(&self, id: OverlayId, index: usize) -> anyhow::Result<()>;

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    fn push_history(&self, entry: &HistoryEntry) -> anyhow::Result<()>;

    // ------------------------------------------------------------------
    // Post list
    // ------------------------------------------------------------------

    /// Append one summary card to `container` and start its fade-in.
    fn append_card(&self, container: &str, markup: &str) -> anyhow::Result<()>;

    /// Update the "load more" control and its `data-loaded` counter.
    fn set_trigger(&self, selector: &str, state: &TriggerState, loaded: usize)
    -> anyhow::Result<()>;

    // ------------------------------------------------------------------
    // Suspension points
    // ------------------------------------------------------------------

    async fn fetch(&self, url: &str) -> anyhow::Result<FetchResponse>;

    /// Resolve on the next animation frame.
    async fn next_frame(&self);

    /// Resolve after `ms` milliseconds.
    async fn sleep(&self, ms: u32);
}
