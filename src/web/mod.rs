//! Browser entry point.
//!
//! Builds one [`Spa`] per page, starts it, then wires the document listeners:
//!
//! | Event | Target | Handler |
//! |-------|--------|---------|
//! | `click` | document | search results, overlay controls, links |
//! | `popstate` | window | history replay |
//! | `keydown` | document | Escape closes the overlay |
//! | `scroll` (capture) | document | TOC scroll spy of the open overlay |
//! | `click` | `#load-more-btn` | next batch of cards |
//! | `input`/`keydown` | `#searchInput` | debounced search, Enter, Escape |

mod host;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use wasm_bindgen::convert::FromWasmAbi;
use web_sys::{
    Element, Event, EventTarget, HtmlInputElement, KeyboardEvent, MouseEvent,
    PopStateEvent,
};

pub use host::BrowserHost;
use host::js_error;

use crate::config::SpaConfig;
use crate::host::Host;
use crate::intercept::{ClickInfo, OverlayControl};
use crate::log;
use crate::navigation::NavigationState;
use crate::search::SearchView;
use crate::spa::Spa;

type App = Rc<Spa<BrowserHost>>;

/// Inline configuration block: `<script type="application/toml" id="spa-config">`.
const CONFIG_ELEMENT: &str = "spa-config";

const SEARCH_FORM: &str = "#searchForm";
const SEARCH_INPUT: &str = "#searchInput";
const SEARCH_RESULTS: &str = "#searchResults";
const SEARCH_TOGGLE: &str = ".search-toggle";
const SEARCH_CLOSE: &str = ".search-close";
const SEARCH_SUBMIT: &str = ".search-submit";
const SEARCH_RESULT_ITEM: &str = ".search-result-item";

/// Scroll container of every overlay.
const OVERLAY_CONTENT: &str = ".post-overlay-content";

#[wasm_bindgen(start)]
pub fn start() {
    let host = match BrowserHost::new() {
        Ok(host) => host,
        Err(err) => {
            log!("error"; "cannot start: {err:#}");
            return;
        }
    };

    let config = read_config(&host);
    let app: App = Rc::new(Spa::new(host, config));

    if app.host().document().ready_state() == "loading" {
        let document: EventTarget = app.host().document().clone().into();
        let mut pending = Some(app);
        listen(&document, "DOMContentLoaded", move |_: Event| {
            if let Some(app) = pending.take() {
                boot(app);
            }
        });
    } else {
        boot(app);
    }
}

fn boot(app: App) {
    spawn_local(async move {
        app.init().await;
        install(&app);
    });
}

fn read_config(host: &BrowserHost) -> SpaConfig {
    let Some(source) = host
        .document()
        .get_element_by_id(CONFIG_ELEMENT)
        .and_then(|el| el.text_content())
    else {
        return SpaConfig::default();
    };

    SpaConfig::from_str(&source).unwrap_or_else(|err| {
        log!("error"; "ignoring #{CONFIG_ELEMENT}: {err}");
        SpaConfig::default()
    })
}

// ============================================================================
// Listeners
// ============================================================================

/// Register `handler` for `event` on `target` for the lifetime of the page.
fn listen<E, F>(target: &EventTarget, event: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    listen_with(target, event, false, handler);
}

fn listen_with<E, F>(target: &EventTarget, event: &str, capture: bool, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback_and_bool(
        event,
        closure.as_ref().unchecked_ref(),
        capture,
    ) {
        log!("error"; "could not listen to {event}: {:#}", js_error(err));
    }
    // Listeners live as long as the document.
    closure.forget();
}

fn install(app: &App) {
    let document: EventTarget = app.host().document().clone().into();
    let window: EventTarget = app.host().window().clone().into();

    let search = Rc::new(SearchPanel::new(app.clone()));
    search.install();

    {
        let app = app.clone();
        let search = search.clone();
        listen(&document, "click", move |event: MouseEvent| on_click(&app, &search, &event));
    }

    if !app.mode().is_passive() {
        let app_pop = app.clone();
        listen(&window, "popstate", move |event: PopStateEvent| {
            let state = history_state(&event);
            let app = app_pop.clone();
            spawn_local(async move {
                app.handle_popstate(state).await;
            });
        });

        let app_key = app.clone();
        listen(&document, "keydown", move |event: KeyboardEvent| {
            let key = event.key();
            if key != "Escape" {
                return;
            }
            let app = app_key.clone();
            spawn_local(async move {
                app.handle_key(&key).await;
            });
        });

        // `scroll` does not bubble; overlays come and go, so catch it on the way down.
        let app_scroll = app.clone();
        listen_with(&document, "scroll", true, move |event: Event| {
            let from_overlay = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el.matches(OVERLAY_CONTENT).unwrap_or(false));
            if from_overlay {
                app_scroll.update_toc();
            }
        });
    }

    let trigger = app.config().list.trigger.clone();
    if let Some(trigger) = app.host().query(&trigger) {
        let app = app.clone();
        listen(&trigger.into(), "click", move |_: Event| {
            let app = app.clone();
            spawn_local(async move {
                app.load_more().await;
            });
        });
    }
}

fn on_click(app: &App, search: &Rc<SearchPanel>, event: &MouseEvent) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    if let Some(url) = closest(&target, SEARCH_RESULT_ITEM).and_then(|item| item.get_attribute("data-url")) {
        event.prevent_default();
        search.close();
        let app = app.clone();
        spawn_local(async move {
            app.open_search_result(&url).await;
        });
        return;
    }

    if search.is_open()
        && closest(&target, SEARCH_FORM).is_none()
        && closest(&target, SEARCH_TOGGLE).is_none()
    {
        search.close();
    }

    let click = click_info(&target, event);
    let action = app.handle_click(&click);
    if !action.is_handled() {
        return;
    }

    event.prevent_default();
    let app = app.clone();
    spawn_local(async move {
        app.follow(action).await;
    });
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

fn click_info(target: &Element, event: &MouseEvent) -> ClickInfo {
    let anchor = closest(target, "a");
    let control = OverlayControl::ALL
        .iter()
        .find(|(selector, _)| closest(target, selector).is_some())
        .map(|(_, control)| *control);

    ClickInfo {
        href: anchor.as_ref().and_then(|a| a.get_attribute("href")),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        shift: event.shift_key(),
        button: event.button(),
        control,
        spa_link: anchor.is_some_and(|a| a.has_attribute("data-spa-link")),
    }
}

fn history_state(event: &PopStateEvent) -> Option<NavigationState> {
    let state = event.state();
    if state.is_null() || state.is_undefined() {
        return None;
    }
    js_sys::JSON::stringify(&state)
        .ok()
        .and_then(|json| json.as_string())
        .and_then(|json| NavigationState::from_history_json(&json))
}

// ============================================================================
// Search panel
// ============================================================================

struct SearchPanel {
    app: App,
    open: Cell<bool>,
    /// Bumped on every keystroke; a debounced run only fires if still current.
    generation: Cell<u64>,
}

impl SearchPanel {
    fn new(app: App) -> Self {
        Self {
            app,
            open: Cell::new(false),
            generation: Cell::new(0),
        }
    }

    fn host(&self) -> &BrowserHost {
        self.app.host()
    }

    fn input(&self) -> Option<HtmlInputElement> {
        self.host()
            .query(SEARCH_INPUT)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn install(self: &Rc<Self>) {
        if self.host().query(SEARCH_FORM).is_none() {
            return;
        }

        for selector in [SEARCH_TOGGLE, SEARCH_CLOSE] {
            if let Some(button) = self.host().query(selector) {
                let panel = self.clone();
                listen(&button.into(), "click", move |event: Event| {
                    event.stop_propagation();
                    panel.toggle();
                });
            }
        }

        if let Some(button) = self.host().query(SEARCH_SUBMIT) {
            let panel = self.clone();
            listen(&button.into(), "click", move |_: Event| panel.run_now());
        }

        if let Some(input) = self.input() {
            let panel = self.clone();
            listen(&input.clone().into(), "input", move |_: Event| panel.schedule());

            let panel = self.clone();
            listen(&input.into(), "keydown", move |event: KeyboardEvent| {
                match event.key().as_str() {
                    "Enter" => {
                        event.prevent_default();
                        panel.run_now();
                    }
                    "Escape" => panel.close(),
                    _ => {}
                }
            });
        }
    }

    fn toggle(&self) {
        if self.is_open() {
            self.close();
            return;
        }
        self.open.set(true);
        if let Some(form) = self.host().query(SEARCH_FORM) {
            form.class_list().add_1("active").ok();
        }
        if let Some(input) = self.input() {
            input.focus().ok();
        }
    }

    fn close(&self) {
        self.open.set(false);
        self.generation.set(self.generation.get() + 1);
        if let Some(form) = self.host().query(SEARCH_FORM) {
            form.class_list().remove_1("active").ok();
        }
        if let Some(input) = self.input() {
            input.set_value("");
        }
        self.show(&SearchView::Cleared);
    }

    /// Debounced run after typing.
    fn schedule(self: &Rc<Self>) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let panel = self.clone();
        spawn_local(async move {
            let delay = panel.app.config().search.debounce_ms;
            panel.host().sleep(delay).await;
            if panel.generation.get() == generation {
                panel.run_now();
            }
        });
    }

    fn run_now(&self) {
        let query = self.input().map(|input| input.value()).unwrap_or_default();
        self.show(&self.app.search(&query));
    }

    fn show(&self, view: &SearchView) {
        let Some(results) = self.host().query(SEARCH_RESULTS) else {
            return;
        };
        match view {
            SearchView::Cleared => {
                results.set_inner_html("");
                results.class_list().remove_1("has-results").ok();
            }
            SearchView::Rendered { markup, .. } => {
                results.set_inner_html(markup);
                results.class_list().add_1("has-results").ok();
            }
        }
    }
}
