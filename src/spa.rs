//! The navigation controller.
//!
//! [`Spa`] owns the session: the mode decided at startup, the content index,
//! the visible route and the mounted overlay. Every DOM listener shares one
//! `Rc<Spa<H>>`.
//!
//! Navigation is at most one at a time. A loading guard is taken before the
//! entry lookup and released once the new overlay is active; navigations
//! requested meanwhile are dropped, not queued. State lives in `Cell`s and
//! `RefCell`s that are never borrowed across an `.await`.

use std::cell::{Cell, RefCell};

use crate::config::SpaConfig;
use crate::host::{Host, OverlayId};
use crate::index::{Collection, ContentEntry, ContentIndex};
use crate::intercept::{self, ClickInfo, LinkAction, OverlayControl};
use crate::loader::{LoadOutcome, PostListLoader};
use crate::log;
use crate::navigation::{self, HistoryEntry, NavEvent, NavigationState, Transition};
use crate::render::{self, toc};
use crate::route::{self, SessionMode};
use crate::search::{self, SearchView};
use crate::utils::slug;

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// The requested view is on screen.
    Shown,
    /// Dropped: another navigation is in flight, or nothing to do.
    Ignored,
    /// No entry matches the slug. Nothing changed.
    NotFound,
}

/// Clears the loading flag when dropped.
struct LoadingGuard<'a>(&'a Cell<bool>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct Spa<H: Host> {
    host: H,
    config: SpaConfig,
    index: ContentIndex,
    loader: PostListLoader,

    mode: Cell<SessionMode>,
    state: RefCell<NavigationState>,
    current: RefCell<Option<ContentEntry>>,
    loading: Cell<bool>,

    last_id: Cell<u64>,
    /// Overlay currently shown.
    mounted: Cell<Option<OverlayId>>,
    /// Overlay playing its exit animation.
    exiting: Cell<Option<OverlayId>>,
}

impl<H: Host> Spa<H> {
    pub fn new(host: H, config: SpaConfig) -> Self {
        Self {
            index: ContentIndex::new(&config.index),
            loader: PostListLoader::new(),
            host,
            config,
            mode: Cell::new(SessionMode::default()),
            state: RefCell::new(NavigationState::Home),
            current: RefCell::new(None),
            loading: Cell::new(false),
            last_id: Cell::new(0),
            mounted: Cell::new(None),
            exiting: Cell::new(None),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &SpaConfig {
        &self.config
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    pub fn mode(&self) -> SessionMode {
        self.mode.get()
    }

    pub fn current_state(&self) -> NavigationState {
        self.state.borrow().clone()
    }

    /// Entry shown in the overlay, if any.
    pub fn current_entry(&self) -> Option<ContentEntry> {
        self.current.borrow().clone()
    }

    pub fn mounted_overlay(&self) -> Option<OverlayId> {
        self.mounted.get()
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Decide the session mode, load the index and apply the initial route.
    pub async fn init(&self) -> ShowOutcome {
        let pathname = self.host.pathname();
        let routes = &self.config.routes;
        let mode = route::classify(
            &pathname,
            self.host.exists(&routes.content_region),
            routes,
        );
        self.mode.set(mode);

        self.index.load_posts(&self.host).await;
        self.index.load_pages(&self.host).await;

        let slug = slug::post_slug_from_href(&pathname, &routes.post_prefix);

        if mode.is_passive() {
            log!("spa"; "rendered post page, overlay navigation disabled");
            if !self.host.exists(route::BACK_TO_HOME_SELECTOR) {
                self.report(
                    "inject back-to-home control",
                    self.host.append_html("body", route::BACK_TO_HOME_MARKUP),
                );
            }
            if let Some(slug) = slug {
                *self.state.borrow_mut() = NavigationState::Post { slug };
            }
            return ShowOutcome::Ignored;
        }

        match slug {
            Some(slug) => self.dispatch(NavEvent::Initial(NavigationState::Post { slug })).await,
            None => ShowOutcome::Ignored,
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Decide what a click does. The caller prevents the browser default
    /// when the action [is handled](LinkAction::is_handled), then passes it
    /// to [`Spa::follow`].
    pub fn handle_click(&self, click: &ClickInfo) -> LinkAction {
        if self.mode().is_passive() {
            return match click.control {
                Some(OverlayControl::BackToHome) => LinkAction::Navigate("/".to_owned()),
                _ => LinkAction::Native,
            };
        }
        intercept::decide(click, &self.config.routes, |href| self.index.is_page_url(href))
    }

    /// Carry out a click decision.
    pub async fn follow(&self, action: LinkAction) -> ShowOutcome {
        match action {
            LinkAction::Native => ShowOutcome::Ignored,
            LinkAction::Post(slug) => {
                log!("spa"; "intercepting post link: {slug}");
                self.dispatch(NavEvent::Open(NavigationState::Post { slug })).await
            }
            LinkAction::Page(slug) => {
                log!("spa"; "intercepting page link: {slug}");
                self.dispatch(NavEvent::Open(NavigationState::Page { slug })).await
            }
            LinkAction::Home => self.dispatch(NavEvent::Close).await,
            LinkAction::Navigate(url) => {
                self.host.navigate(&url);
                ShowOutcome::Shown
            }
            LinkAction::ScrollTo(target) => {
                self.report("scroll", self.host.scroll_to(self.mounted.get(), &target));
                ShowOutcome::Shown
            }
        }
    }

    /// Replay a history entry after back/forward.
    pub async fn handle_popstate(&self, state: Option<NavigationState>) -> ShowOutcome {
        if self.mode().is_passive() {
            return ShowOutcome::Ignored;
        }
        self.dispatch(NavEvent::Popped(state)).await
    }

    /// Document-level key handling: Escape closes the overlay.
    pub async fn handle_key(&self, key: &str) -> ShowOutcome {
        if self.mode().is_passive() || key != "Escape" {
            return ShowOutcome::Ignored;
        }
        self.dispatch(NavEvent::Escape).await
    }

    /// Scroll spy: highlight the sidebar link of the heading the reader has
    /// scrolled to in the open post.
    pub fn update_toc(&self) {
        let Some(id) = self.mounted.get() else {
            return;
        };
        if !matches!(*self.state.borrow(), NavigationState::Post { .. }) {
            return;
        }
        let offsets = self.host.heading_offsets(id);
        if offsets.is_empty() {
            return;
        }
        let index = toc::active_heading(&offsets, toc::ACTIVE_THRESHOLD);
        self.report("highlight toc", self.host.set_active_toc_link(id, index));
    }

    /// Search the post index.
    pub fn search(&self, query: &str) -> SearchView {
        search::run(
            &self.index.get(Collection::Posts),
            query,
            self.config.search.excerpt_len,
        )
    }

    /// Follow a clicked search result.
    pub async fn open_search_result(&self, url: &str) -> ShowOutcome {
        let slug = slug::post_slug_from_href(url, &self.config.routes.post_prefix);
        match slug {
            Some(slug) if !self.mode().is_passive() => {
                self.dispatch(NavEvent::Open(NavigationState::Post { slug })).await
            }
            _ => {
                self.host.navigate(url);
                ShowOutcome::Shown
            }
        }
    }

    /// Append the next batch of the home page post list.
    pub async fn load_more(&self) -> LoadOutcome {
        self.loader
            .load_more(&self.host, &self.index, &self.config.list)
            .await
    }

    /// Apply a navigation event through the transition table.
    pub async fn dispatch(&self, event: NavEvent) -> ShowOutcome {
        let current = self.current_state();
        let Transition { next, push_history } = navigation::reduce(&current, event);

        match next {
            NavigationState::Home if current == NavigationState::Home && !push_history => {
                ShowOutcome::Ignored
            }
            NavigationState::Home => {
                self.show_home(push_history).await;
                ShowOutcome::Shown
            }
            NavigationState::Post { slug } => self.show_post(&slug, push_history).await,
            NavigationState::Page { slug } => self.show_page(&slug, push_history).await,
        }
    }

    // ========================================================================
    // Overlay rendering
    // ========================================================================

    /// Open the overlay for a post.
    pub async fn show_post(&self, slug: &str, push_history: bool) -> ShowOutcome {
        self.show(Collection::Posts, slug, push_history).await
    }

    /// Open the overlay for a standalone page.
    pub async fn show_page(&self, slug: &str, push_history: bool) -> ShowOutcome {
        self.show(Collection::Pages, slug, push_history).await
    }

    async fn show(&self, collection: Collection, slug: &str, push_history: bool) -> ShowOutcome {
        let Some(guard) = self.begin_loading() else {
            return ShowOutcome::Ignored;
        };

        let entries = self.index.load(&self.host, collection).await;
        let Some(entry) = slug::find_entry(&entries, slug, collection.matchers()) else {
            log!("spa"; "{} not found: {slug}", collection.name());
            return ShowOutcome::NotFound;
        };

        let state = match collection {
            Collection::Posts => NavigationState::Post { slug: slug.to_owned() },
            Collection::Pages => NavigationState::Page { slug: slug.to_owned() },
        };

        let site_title = self.site_title();
        let markup = match collection {
            Collection::Posts => {
                render::overlay::post(entry, &entries, &site_title, &self.config.routes)
            }
            Collection::Pages => render::overlay::page(entry, &site_title),
        };

        self.unmount_all();
        let id = self.next_id();
        if let Err(err) = self.host.mount_overlay(id, &markup) {
            log!("spa"; "could not mount {id}: {err:#}");
            // The previous overlay is gone too.
            *self.state.borrow_mut() = NavigationState::Home;
            *self.current.borrow_mut() = None;
            return ShowOutcome::Ignored;
        }
        self.mounted.set(Some(id));

        if push_history {
            let entry = HistoryEntry {
                url: state.url(&self.config.routes.post_prefix),
                title: entry.title.clone(),
                state: state.clone(),
            };
            self.report("push history", self.host.push_history(&entry));
        }

        *self.state.borrow_mut() = state;
        *self.current.borrow_mut() = Some(entry.clone());

        self.host.next_frame().await;
        if self.mounted.get() == Some(id) {
            self.report("activate overlay", self.host.set_overlay_active(id, true));
        }
        drop(guard);

        self.host.sleep(self.config.overlay.decorate_delay_ms).await;
        if self.mounted.get() == Some(id) {
            self.host.decorate_code_blocks(&id.body_selector());
            if collection == Collection::Posts {
                self.host.build_toc(&id.selector());
                self.update_toc();
            }
        }

        ShowOutcome::Shown
    }

    /// Close the overlay and return to the listing underneath.
    pub async fn show_home(&self, push_history: bool) {
        *self.state.borrow_mut() = NavigationState::Home;
        *self.current.borrow_mut() = None;

        if push_history {
            let entry = HistoryEntry {
                state: NavigationState::Home,
                title: self.site_title(),
                url: NavigationState::Home.url(&self.config.routes.post_prefix),
            };
            self.report("push history", self.host.push_history(&entry));
        }

        let Some(id) = self.mounted.take() else {
            return;
        };
        self.report("deactivate overlay", self.host.set_overlay_active(id, false));

        // A previous exit still running is cut short.
        if let Some(previous) = self.exiting.replace(Some(id)) {
            self.report("remove overlay", self.host.remove_overlay(previous));
        }

        self.host.sleep(self.config.overlay.exit_delay_ms).await;

        if self.exiting.get() == Some(id) {
            self.exiting.set(None);
            self.report("remove overlay", self.host.remove_overlay(id));
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn begin_loading(&self) -> Option<LoadingGuard<'_>> {
        if self.loading.replace(true) {
            return None;
        }
        Some(LoadingGuard(&self.loading))
    }

    fn next_id(&self) -> OverlayId {
        let id = self.last_id.get() + 1;
        self.last_id.set(id);
        OverlayId(id)
    }

    /// Synchronously detach the shown overlay and any overlay still exiting.
    fn unmount_all(&self) {
        for id in [self.mounted.take(), self.exiting.take()].into_iter().flatten() {
            self.report("remove overlay", self.host.remove_overlay(id));
        }
    }

    fn site_title(&self) -> String {
        self.host
            .text_content(&self.config.overlay.title_selector)
            .map(|title| title.trim().to_owned())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| self.config.overlay.site_title.clone())
    }

    fn report(&self, what: &str, result: anyhow::Result<()>) {
        if let Err(err) = result {
            log!("spa"; "{what} failed: {err:#}");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHost;

    const POSTS: &str = r#"[
        {"slug": "a", "url": "/blog/a/", "title": "Post A", "tags": ["rust"], "date": "2024-03-01", "content": "<h2>One</h2>"},
        {"slug": "b", "url": "/blog/b/", "title": "Post B", "tags": ["rust", "wasm"], "date": "2024-02-01"},
        {"url": "/blog/my-post/", "title": "Slugless", "date": "2024-01-01"}
    ]"#;

    const PAGES: &str = r#"[
        {"slug": "about", "url": "/about/", "title": "About", "summary": "Me"}
    ]"#;

    fn host_at(pathname: &str) -> MockHost {
        let host = MockHost::at(pathname);
        host.respond("/index.json", 200, POSTS);
        host.respond("/talks/pages.json", 200, PAGES);
        host
    }

    async fn started(pathname: &str) -> Spa<MockHost> {
        let spa = Spa::new(host_at(pathname), SpaConfig::default());
        spa.init().await;
        spa
    }

    fn post(slug: &str) -> NavigationState {
        NavigationState::Post { slug: slug.into() }
    }

    #[tokio::test]
    async fn test_show_post_mounts_and_pushes() {
        let spa = started("/").await;
        assert_eq!(spa.show_post("a", true).await, ShowOutcome::Shown);

        let host = spa.host();
        let overlays = host.overlays();
        assert_eq!(overlays.len(), 1);
        assert!(overlays[0].active);
        assert!(overlays[0].markup.contains("Post A"));
        assert_eq!(host.pathname(), "/blog/a/");
        assert_eq!(host.history_state(), Some(post("a")));
        assert_eq!(spa.current_state(), post("a"));
        assert_eq!(spa.current_entry().map(|e| e.title), Some("Post A".into()));

        let id = overlays[0].id;
        assert_eq!(host.decorated(), vec![id.body_selector()]);
        assert_eq!(host.tocs(), vec![id.selector()]);
        assert!(host.sleeps().contains(&100));
    }

    #[tokio::test]
    async fn test_show_page_skips_toc() {
        let spa = started("/").await;
        assert_eq!(spa.show_page("about", true).await, ShowOutcome::Shown);

        let host = spa.host();
        assert_eq!(host.pathname(), "/about/");
        assert_eq!(spa.current_state(), NavigationState::Page { slug: "about".into() });
        assert_eq!(host.decorated().len(), 1);
        assert!(host.tocs().is_empty());
        assert!(!host.overlays()[0].markup.contains("sidebar"));
    }

    #[tokio::test]
    async fn test_show_home_removes_overlay_after_exit_delay() {
        let spa = started("/").await;
        spa.show_post("a", true).await;
        spa.show_home(true).await;

        let host = spa.host();
        assert!(host.overlays().is_empty());
        assert!(host.sleeps().contains(&300));
        assert_eq!(host.pathname(), "/");
        assert_eq!(host.history_state(), Some(NavigationState::Home));
        assert_eq!(spa.current_state(), NavigationState::Home);
        assert!(spa.current_entry().is_none());
    }

    #[tokio::test]
    async fn test_at_most_one_overlay() {
        let spa = started("/").await;
        spa.show_post("a", true).await;
        spa.show_post("b", true).await;
        spa.show_page("about", true).await;
        spa.handle_popstate(spa.host().back().flatten()).await;
        spa.handle_popstate(spa.host().back().flatten()).await;
        spa.handle_popstate(spa.host().forward().flatten()).await;
        spa.handle_key("Escape").await;

        // Closing and reopening while the exit animation runs
        spa.show_post("a", true).await;
        let (_, reopened) = tokio::join!(spa.show_home(true), spa.show_post("b", true));
        assert_eq!(reopened, ShowOutcome::Shown);

        let host = spa.host();
        assert_eq!(host.max_overlays(), 1);
        assert_eq!(host.overlays().len(), 1);
        assert_eq!(spa.mounted_overlay(), Some(host.overlays()[0].id));
    }

    #[tokio::test]
    async fn test_back_restores_previous_post() {
        let spa = started("/").await;
        spa.show_post("a", true).await;
        spa.show_post("b", true).await;
        let len = spa.host().history_len();

        let state = spa.host().back().flatten();
        assert_eq!(spa.handle_popstate(state).await, ShowOutcome::Shown);

        assert_eq!(spa.current_state(), post("a"));
        assert_eq!(spa.host().history_len(), len);
        assert_eq!(spa.host().pathname(), "/blog/a/");
        assert!(spa.host().overlays()[0].markup.contains("Post A"));
    }

    #[tokio::test]
    async fn test_back_to_start_goes_home() {
        let spa = started("/").await;
        spa.show_post("a", true).await;

        let state = spa.host().back().flatten();
        assert_eq!(state, None);
        spa.handle_popstate(state).await;

        assert_eq!(spa.current_state(), NavigationState::Home);
        assert!(spa.host().overlays().is_empty());
        assert_eq!(spa.host().history_len(), 2);
    }

    #[tokio::test]
    async fn test_slug_fallback() {
        let spa = started("/").await;
        assert_eq!(spa.show_post("my-post", true).await, ShowOutcome::Shown);
        assert!(spa.host().overlays()[0].markup.contains("Slugless"));
    }

    #[tokio::test]
    async fn test_concurrent_show_builds_one_overlay() {
        let spa = started("/").await;
        let (first, second) = tokio::join!(spa.show_post("a", true), spa.show_post("b", true));

        assert_eq!(first, ShowOutcome::Shown);
        assert_eq!(second, ShowOutcome::Ignored);
        let host = spa.host();
        assert_eq!(host.max_overlays(), 1);
        assert_eq!(host.history_len(), 2);
        assert_eq!(spa.current_state(), post("a"));

        // Flag released: the next navigation goes through
        assert_eq!(spa.show_post("b", true).await, ShowOutcome::Shown);
    }

    #[tokio::test]
    async fn test_missing_slug_changes_nothing() {
        let spa = started("/").await;
        assert_eq!(spa.show_post("nope", true).await, ShowOutcome::NotFound);

        let host = spa.host();
        assert_eq!(spa.current_state(), NavigationState::Home);
        assert_eq!(host.pathname(), "/");
        assert_eq!(host.history_len(), 1);
        assert!(host.overlays().is_empty());

        // Not stuck loading
        assert_eq!(spa.show_post("a", true).await, ShowOutcome::Shown);
    }

    #[tokio::test]
    async fn test_missing_slug_keeps_open_overlay() {
        let spa = started("/").await;
        spa.show_post("a", true).await;
        spa.show_post("nope", true).await;

        assert_eq!(spa.current_state(), post("a"));
        assert_eq!(spa.host().pathname(), "/blog/a/");
        assert_eq!(spa.host().overlays().len(), 1);
    }

    #[tokio::test]
    async fn test_passive_mode_never_intercepts() {
        let host = host_at("/blog/a/");
        host.add_element(".post-layout .post-content .post-body");
        let spa = Spa::new(host, SpaConfig::default());
        spa.init().await;

        assert_eq!(spa.mode(), SessionMode::Passive);
        assert_eq!(spa.current_state(), post("a"));
        assert_eq!(spa.handle_click(&ClickInfo::link("/blog/b/")), LinkAction::Native);
        assert_eq!(spa.handle_click(&ClickInfo::link("/about/")), LinkAction::Native);
        assert_eq!(spa.handle_popstate(Some(post("b"))).await, ShowOutcome::Ignored);
        assert_eq!(spa.handle_key("Escape").await, ShowOutcome::Ignored);

        let host = spa.host();
        assert!(host.overlays().is_empty());
        assert_eq!(host.history_len(), 1);
        assert_eq!(
            host.appended(),
            vec![("body".to_owned(), route::BACK_TO_HOME_MARKUP.to_owned())]
        );

        let action = spa.handle_click(&ClickInfo::control(OverlayControl::BackToHome));
        assert_eq!(action, LinkAction::Navigate("/".into()));
        spa.follow(action).await;
        assert_eq!(spa.host().navigations(), vec!["/"]);
    }

    #[tokio::test]
    async fn test_passive_keeps_existing_back_button() {
        let host = host_at("/blog/a/");
        host.add_element(".post-layout .post-content .post-body");
        host.add_element(".back-to-home-btn");
        let spa = Spa::new(host, SpaConfig::default());
        spa.init().await;
        assert!(spa.host().appended().is_empty());
    }

    #[tokio::test]
    async fn test_initial_post_route_does_not_push() {
        let spa = started("/blog/b/").await;

        assert_eq!(spa.mode(), SessionMode::Interactive);
        assert_eq!(spa.current_state(), post("b"));
        assert_eq!(spa.host().history_len(), 1);
        assert_eq!(spa.host().overlays().len(), 1);
        assert_eq!(spa.host().fetches(), vec!["/index.json", "/talks/pages.json"]);
    }

    #[tokio::test]
    async fn test_click_flow() {
        let spa = started("/").await;

        let action = spa.handle_click(&ClickInfo::link("/about"));
        assert_eq!(action, LinkAction::Page("about".into()));
        assert_eq!(spa.follow(action).await, ShowOutcome::Shown);

        let action = spa.handle_click(&ClickInfo::control(OverlayControl::Backdrop));
        assert_eq!(action, LinkAction::Home);
        spa.follow(action).await;
        assert_eq!(spa.current_state(), NavigationState::Home);
        assert_eq!(spa.host().history_urls(), vec!["/", "/about/", "/"]);

        assert_eq!(spa.handle_click(&ClickInfo::link("/tags/rust")), LinkAction::Native);
        assert_eq!(spa.follow(LinkAction::Native).await, ShowOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_escape_only_when_open() {
        let spa = started("/").await;
        assert_eq!(spa.handle_key("Escape").await, ShowOutcome::Ignored);
        assert_eq!(spa.host().history_len(), 1);

        spa.show_post("a", true).await;
        assert_eq!(spa.handle_key("Enter").await, ShowOutcome::Ignored);
        assert_eq!(spa.handle_key("Escape").await, ShowOutcome::Shown);
        assert_eq!(spa.current_state(), NavigationState::Home);
        assert_eq!(spa.host().history_len(), 3);
    }

    #[tokio::test]
    async fn test_site_title_from_document() {
        let host = host_at("/");
        host.set_text(".logo", "  Alice's Lofi  ");
        let spa = Spa::new(host, SpaConfig::default());
        spa.init().await;
        spa.show_post("a", true).await;

        assert!(spa.host().overlays()[0].markup.contains("Alice&apos;s Lofi</a>"));
    }

    #[tokio::test]
    async fn test_toc_link_scrolls_without_closing() {
        let spa = started("/").await;
        spa.show_post("a", true).await;
        let id = spa.mounted_overlay();
        let len = spa.host().history_len();

        let action = spa.handle_click(&ClickInfo::link("#heading-0"));
        assert_eq!(action, LinkAction::ScrollTo("heading-0".into()));
        assert!(action.is_handled());
        assert_eq!(spa.follow(action).await, ShowOutcome::Shown);

        let host = spa.host();
        assert_eq!(host.scrolls(), vec![(id, "heading-0".to_owned())]);
        assert_eq!(spa.current_state(), post("a"));
        assert_eq!(host.overlays().len(), 1);
        assert_eq!(host.history_len(), len);
    }

    #[tokio::test]
    async fn test_fragment_link_on_home_scrolls_document() {
        let spa = started("/").await;
        let action = spa.handle_click(&ClickInfo::link("#about"));
        spa.follow(action).await;

        assert_eq!(spa.host().scrolls(), vec![(None, "about".to_owned())]);
        assert_eq!(spa.current_state(), NavigationState::Home);
    }

    #[tokio::test]
    async fn test_scroll_spy_highlights_reached_heading() {
        let host = host_at("/");
        host.set_heading_offsets(&[-300.0, 40.0, 650.0]);
        let spa = Spa::new(host, SpaConfig::default());
        spa.init().await;

        spa.show_post("a", true).await;
        let id = spa.mounted_overlay().unwrap();
        assert_eq!(spa.host().active_toc(), vec![(id, 1)]);

        spa.host().set_heading_offsets(&[-900.0, -500.0, 90.0]);
        spa.update_toc();
        assert_eq!(spa.host().active_toc().last(), Some(&(id, 2)));

        // Pages and the home view have no sidebar to update
        spa.show_page("about", true).await;
        spa.update_toc();
        spa.show_home(true).await;
        spa.update_toc();
        assert_eq!(spa.host().active_toc().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_mount_leaves_home_state() {
        let spa = started("/").await;
        spa.show_post("a", true).await;
        let len = spa.host().history_len();

        spa.host().refuse_mounts();
        assert_eq!(spa.show_post("b", true).await, ShowOutcome::Ignored);

        let host = spa.host();
        assert_eq!(spa.current_state(), NavigationState::Home);
        assert!(spa.current_entry().is_none());
        assert_eq!(spa.mounted_overlay(), None);
        assert!(host.overlays().is_empty());
        assert_eq!(host.history_len(), len);
    }

    #[tokio::test]
    async fn test_search_results() {
        let spa = started("/").await;
        assert_eq!(spa.search(""), SearchView::Cleared);

        let SearchView::Rendered { count, .. } = spa.search("wasm") else {
            panic!("expected results");
        };
        assert_eq!(count, 1);

        assert_eq!(spa.open_search_result("/blog/b/").await, ShowOutcome::Shown);
        assert_eq!(spa.current_state(), post("b"));

        spa.open_search_result("/about/").await;
        assert_eq!(spa.host().navigations(), vec!["/about/"]);
    }

    #[tokio::test]
    async fn test_index_unavailable() {
        let spa = Spa::new(MockHost::at("/"), SpaConfig::default());
        spa.init().await;

        assert_eq!(spa.show_post("a", true).await, ShowOutcome::NotFound);
        assert_eq!(spa.handle_click(&ClickInfo::link("/about/")), LinkAction::Native);
        assert!(spa.host().overlays().is_empty());
    }
}
