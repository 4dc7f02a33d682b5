//! In-memory [`Host`] for controller tests.
//!
//! Records every mutation instead of touching a document. Suspension points
//! yield to the runtime once, so two navigations started with `tokio::join!`
//! interleave the way they would in a browser event loop.

use std::cell::{Cell, RefCell};

use anyhow::anyhow;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::host::{Collaborators, FetchResponse, Host, OverlayId, TriggerState};
use crate::navigation::{HistoryEntry, NavigationState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedOverlay {
    pub id: OverlayId,
    pub markup: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub container: String,
    pub markup: String,
}

/// One entry of the simulated session history.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    /// `None` for the entry the page was loaded with.
    state: Option<NavigationState>,
    url: String,
}

#[derive(Debug, Default)]
pub struct MockHost {
    elements: RefCell<FxHashSet<String>>,
    texts: RefCell<FxHashMap<String, String>>,
    data: RefCell<FxHashMap<(String, String), String>>,
    responses: RefCell<FxHashMap<String, FetchResponse>>,
    fetches: RefCell<Vec<String>>,

    overlays: RefCell<Vec<MountedOverlay>>,
    max_overlays: Cell<usize>,
    refuse_mounts: Cell<bool>,
    heading_offsets: RefCell<Vec<f64>>,
    active_toc: RefCell<Vec<(OverlayId, usize)>>,
    scrolls: RefCell<Vec<(Option<OverlayId>, String)>>,
    history: RefCell<Vec<Slot>>,
    cursor: Cell<usize>,

    appended: RefCell<Vec<(String, String)>>,
    cards: RefCell<Vec<Card>>,
    triggers: RefCell<Vec<(TriggerState, usize)>>,
    navigations: RefCell<Vec<String>>,
    decorated: RefCell<Vec<String>>,
    tocs: RefCell<Vec<String>>,
    sleeps: RefCell<Vec<u32>>,
}

impl MockHost {
    /// A document at `/` with an empty history.
    pub fn new() -> Self {
        Self::at("/")
    }

    /// A document loaded at `pathname`.
    pub fn at(pathname: &str) -> Self {
        let host = Self::default();
        host.history.borrow_mut().push(Slot {
            state: None,
            url: pathname.to_owned(),
        });
        host
    }

    // ------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------

    /// Register a canned response. URLs without one fail as network errors.
    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.responses.borrow_mut().insert(
            url.to_owned(),
            FetchResponse {
                status,
                body: body.to_owned(),
            },
        );
    }

    /// Make `selector` match an element.
    pub fn add_element(&self, selector: &str) {
        self.elements.borrow_mut().insert(selector.to_owned());
    }

    pub fn set_text(&self, selector: &str, text: &str) {
        self.add_element(selector);
        self.texts
            .borrow_mut()
            .insert(selector.to_owned(), text.to_owned());
    }

    pub fn set_data(&self, selector: &str, name: &str, value: &str) {
        self.add_element(selector);
        self.data
            .borrow_mut()
            .insert((selector.to_owned(), name.to_owned()), value.to_owned());
    }

    /// Make every later `mount_overlay` fail.
    pub fn refuse_mounts(&self) {
        self.refuse_mounts.set(true);
    }

    /// Heading positions reported for any mounted overlay.
    pub fn set_heading_offsets(&self, offsets: &[f64]) {
        *self.heading_offsets.borrow_mut() = offsets.to_vec();
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Simulate the back button. Returns the state to replay, `None` at the
    /// start of history.
    pub fn back(&self) -> Option<Option<NavigationState>> {
        let cursor = self.cursor.get().checked_sub(1)?;
        self.cursor.set(cursor);
        Some(self.history.borrow()[cursor].state.clone())
    }

    /// Simulate the forward button.
    pub fn forward(&self) -> Option<Option<NavigationState>> {
        let cursor = self.cursor.get() + 1;
        let history = self.history.borrow();
        let slot = history.get(cursor)?;
        self.cursor.set(cursor);
        Some(slot.state.clone())
    }

    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    /// State of the current history entry.
    pub fn history_state(&self) -> Option<NavigationState> {
        self.history.borrow()[self.cursor.get()].state.clone()
    }

    /// URLs of every history entry.
    pub fn history_urls(&self) -> Vec<String> {
        self.history.borrow().iter().map(|s| s.url.clone()).collect()
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn overlays(&self) -> Vec<MountedOverlay> {
        self.overlays.borrow().clone()
    }

    /// Most overlays ever mounted at the same time.
    pub fn max_overlays(&self) -> usize {
        self.max_overlays.get()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.borrow().clone()
    }

    pub fn appended(&self) -> Vec<(String, String)> {
        self.appended.borrow().clone()
    }

    pub fn cards(&self) -> Vec<Card> {
        self.cards.borrow().clone()
    }

    pub fn triggers(&self) -> Vec<(TriggerState, usize)> {
        self.triggers.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub fn decorated(&self) -> Vec<String> {
        self.decorated.borrow().clone()
    }

    pub fn tocs(&self) -> Vec<String> {
        self.tocs.borrow().clone()
    }

    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }

    /// Every `set_active_toc_link` call.
    pub fn active_toc(&self) -> Vec<(OverlayId, usize)> {
        self.active_toc.borrow().clone()
    }

    pub fn scrolls(&self) -> Vec<(Option<OverlayId>, String)> {
        self.scrolls.borrow().clone()
    }
}

impl Collaborators for MockHost {
    fn decorate_code_blocks(&self, scope: &str) {
        self.decorated.borrow_mut().push(scope.to_owned());
    }

    fn build_toc(&self, scope: &str) {
        self.tocs.borrow_mut().push(scope.to_owned());
    }
}

impl Host for MockHost {
    fn pathname(&self) -> String {
        self.history.borrow()[self.cursor.get()].url.clone()
    }

    fn exists(&self, selector: &str) -> bool {
        self.elements.borrow().contains(selector)
    }

    fn text_content(&self, selector: &str) -> Option<String> {
        self.texts.borrow().get(selector).cloned()
    }

    fn data_attribute(&self, selector: &str, name: &str) -> Option<String> {
        self.data
            .borrow()
            .get(&(selector.to_owned(), name.to_owned()))
            .cloned()
    }

    fn append_html(&self, selector: &str, markup: &str) -> anyhow::Result<()> {
        self.appended
            .borrow_mut()
            .push((selector.to_owned(), markup.to_owned()));
        Ok(())
    }

    fn navigate(&self, url: &str) {
        self.navigations.borrow_mut().push(url.to_owned());
    }

    fn mount_overlay(&self, id: OverlayId, markup: &str) -> anyhow::Result<()> {
        if self.refuse_mounts.get() {
            return Err(anyhow!("document has no body"));
        }
        let mut overlays = self.overlays.borrow_mut();
        overlays.push(MountedOverlay {
            id,
            markup: markup.to_owned(),
            active: false,
        });
        self.max_overlays.set(self.max_overlays.get().max(overlays.len()));
        Ok(())
    }

    fn set_overlay_active(&self, id: OverlayId, active: bool) -> anyhow::Result<()> {
        let mut overlays = self.overlays.borrow_mut();
        let overlay = overlays
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| anyhow!("{id} is not mounted"))?;
        overlay.active = active;
        Ok(())
    }

    fn remove_overlay(&self, id: OverlayId) -> anyhow::Result<()> {
        self.overlays.borrow_mut().retain(|o| o.id != id);
        Ok(())
    }

    fn scroll_to(&self, overlay: Option<OverlayId>, target: &str) -> anyhow::Result<()> {
        self.scrolls
            .borrow_mut()
            .push((overlay, target.to_owned()));
        Ok(())
    }

    fn heading_offsets(&self, _id: OverlayId) -> Vec<f64> {
        self.heading_offsets.borrow().clone()
    }

    fn set_active_toc_link(&self, id: OverlayId, index: usize) -> anyhow::Result<()> {
        self.active_toc.borrow_mut().push((id, index));
        Ok(())
    }

    fn push_history(&self, entry: &HistoryEntry) -> anyhow::Result<()> {
        let mut history = self.history.borrow_mut();
        let cursor = self.cursor.get() + 1;
        history.truncate(cursor);
        history.push(Slot {
            state: Some(entry.state.clone()),
            url: entry.url.clone(),
        });
        self.cursor.set(cursor);
        Ok(())
    }

    fn append_card(&self, container: &str, markup: &str) -> anyhow::Result<()> {
        self.cards.borrow_mut().push(Card {
            container: container.to_owned(),
            markup: markup.to_owned(),
        });
        Ok(())
    }

    fn set_trigger(
        &self,
        _selector: &str,
        state: &TriggerState,
        loaded: usize,
    ) -> anyhow::Result<()> {
        self.triggers.borrow_mut().push((state.clone(), loaded));
        Ok(())
    }

    async fn fetch(&self, url: &str) -> anyhow::Result<FetchResponse> {
        self.fetches.borrow_mut().push(url.to_owned());
        tokio::task::yield_now().await;
        self.responses
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("connection refused"))
    }

    async fn next_frame(&self) {
        tokio::task::yield_now().await;
    }

    async fn sleep(&self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        tokio::task::yield_now().await;
    }
}
