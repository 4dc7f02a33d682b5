//! [`Host`] on top of `web-sys`.

use anyhow::{Context, Result, anyhow};
use js_sys::{Function, JSON, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, HtmlElement, Response, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::host::{Collaborators, FetchResponse, Host, OverlayId, TriggerState};
use crate::log;
use crate::navigation::HistoryEntry;
use crate::utils::html::escape;

/// Loading indicator shown in place of the "load more" control.
const LOADING_INDICATOR: &str = "#load-more-loading";

/// Delay before a freshly appended card starts fading in.
const CARD_FADE_DELAY_MS: i32 = 50;

/// Header height assumed when the overlay header is not rendered.
const OVERLAY_HEADER_FALLBACK: f64 = 60.0;

/// Gap kept between the overlay header and a scrolled-to heading.
const SCROLL_MARGIN: f64 = 20.0;

/// Headings tracked by the overlay TOC.
const BODY_HEADINGS: &str = ".post-body h2, .post-body h3";

/// Readable message from a thrown JS value.
pub(crate) fn js_error(err: JsValue) -> anyhow::Error {
    match err.as_string() {
        Some(message) => anyhow!(message),
        None => anyhow!("{err:?}"),
    }
}

pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().context("no global window")?;
        let document = window.document().context("window has no document")?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// First element matching `selector`. Invalid selectors match nothing.
    pub fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn require(&self, selector: &str) -> Result<Element> {
        self.query(selector)
            .with_context(|| format!("no element matches `{selector}`"))
    }

    fn require_html(&self, selector: &str) -> Result<HtmlElement> {
        self.require(selector)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| anyhow!("`{selector}` is not an HTML element"))
    }

    /// Elements matching `selector` inside `scope`.
    fn query_all(scope: &Element, selector: &str) -> Vec<Element> {
        let Ok(nodes) = scope.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Call `window[name](scope)` if the page defines it.
    fn call_global(&self, name: &str, scope: &str) {
        let Ok(value) = Reflect::get(&self.window, &JsValue::from_str(name)) else {
            return;
        };
        let Some(function) = value.dyn_ref::<Function>() else {
            return;
        };
        if let Err(err) = function.call1(&JsValue::NULL, &JsValue::from_str(scope)) {
            log!("spa"; "{name}({scope}) failed: {:#}", js_error(err));
        }
    }

    /// Promise resolved by a callback the browser invokes later.
    async fn wait(&self, schedule: impl FnOnce(&Window, &Function) -> Result<(), JsValue>) {
        let mut schedule = Some(schedule);
        let promise = Promise::new(&mut |resolve, _reject| {
            if let Some(schedule) = schedule.take()
                && let Err(err) = schedule(&self.window, &resolve)
            {
                log!("spa"; "could not schedule callback: {:#}", js_error(err));
                resolve.call0(&JsValue::NULL).ok();
            }
        });
        JsFuture::from(promise).await.ok();
    }
}

impl Collaborators for BrowserHost {
    fn decorate_code_blocks(&self, scope: &str) {
        self.call_global("decorateCodeBlocks", scope);
    }

    fn build_toc(&self, scope: &str) {
        self.call_global("buildTOC", scope);
    }
}

impl Host for BrowserHost {
    fn pathname(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_owned())
    }

    fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    fn text_content(&self, selector: &str) -> Option<String> {
        self.query(selector)?.text_content()
    }

    fn data_attribute(&self, selector: &str, name: &str) -> Option<String> {
        self.query(selector)?.get_attribute(&format!("data-{name}"))
    }

    fn append_html(&self, selector: &str, markup: &str) -> Result<()> {
        self.require(selector)?
            .insert_adjacent_html("beforeend", markup)
            .map_err(js_error)
    }

    fn navigate(&self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            log!("spa"; "could not navigate to {url}: {:#}", js_error(err));
        }
    }

    fn mount_overlay(&self, id: OverlayId, markup: &str) -> Result<()> {
        let body = self.document.body().context("document has no body")?;
        let overlay = self.document.create_element("div").map_err(js_error)?;
        overlay.set_class_name("post-overlay");
        overlay
            .set_attribute("data-overlay-id", &id.0.to_string())
            .map_err(js_error)?;
        overlay.set_inner_html(markup);
        body.append_child(&overlay).map_err(js_error)?;
        Ok(())
    }

    fn set_overlay_active(&self, id: OverlayId, active: bool) -> Result<()> {
        self.require(&id.selector())?
            .class_list()
            .toggle_with_force("active", active)
            .map_err(js_error)?;
        Ok(())
    }

    fn remove_overlay(&self, id: OverlayId) -> Result<()> {
        if let Some(overlay) = self.query(&id.selector()) {
            overlay.remove();
        }
        Ok(())
    }

    fn scroll_to(&self, overlay: Option<OverlayId>, target: &str) -> Result<()> {
        let content = overlay.and_then(|id| self.query(&id.content_selector()));

        let Some(content) = content else {
            if let Some(element) = self.document.get_element_by_id(target) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                element.scroll_into_view_with_scroll_into_view_options(&options);
            }
            return Ok(());
        };

        let by_id = format!("[id=\"{}\"]", target.replace('\\', "\\\\").replace('"', "\\\""));
        let Some(element) = content.query_selector(&by_id).map_err(js_error)? else {
            return Ok(());
        };

        let header = content
            .query_selector(".post-overlay-header")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map_or(OVERLAY_HEADER_FALLBACK, |el| f64::from(el.offset_height()));

        let top = element.get_bounding_client_rect().top() + f64::from(content.scroll_top())
            - header
            - SCROLL_MARGIN;

        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        content.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn heading_offsets(&self, id: OverlayId) -> Vec<f64> {
        let Some(content) = self.query(&id.content_selector()) else {
            return Vec::new();
        };
        let container_top = content.get_bounding_client_rect().top();
        Self::query_all(&content, BODY_HEADINGS)
            .iter()
            .map(|heading| heading.get_bounding_client_rect().top() - container_top)
            .collect()
    }

    fn set_active_toc_link(&self, id: OverlayId, index: usize) -> Result<()> {
        let overlay = self.require(&id.selector())?;
        for (i, link) in Self::query_all(&overlay, "#toc-content a").iter().enumerate() {
            link.class_list()
                .toggle_with_force("active", i == index)
                .map_err(js_error)?;
        }
        Ok(())
    }

    fn push_history(&self, entry: &HistoryEntry) -> Result<()> {
        let state = JSON::parse(&entry.state.to_history_json()).map_err(js_error)?;
        self.window
            .history()
            .map_err(js_error)?
            .push_state_with_url(&state, &entry.title, Some(entry.url.as_str()))
            .map_err(js_error)
    }

    fn append_card(&self, container: &str, markup: &str) -> Result<()> {
        let container = self.require(container)?;
        container
            .insert_adjacent_html("beforeend", markup)
            .map_err(js_error)?;

        let Some(card) = container
            .last_element_child()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return Ok(());
        };

        let style = card.style();
        style.set_property("opacity", "0").map_err(js_error)?;
        style
            .set_property("transform", "translateY(20px)")
            .map_err(js_error)?;

        let window = self.window.clone();
        spawn_local(async move {
            let promise = Promise::new(&mut |resolve, _reject| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        &resolve,
                        CARD_FADE_DELAY_MS,
                    )
                    .ok();
            });
            JsFuture::from(promise).await.ok();

            let style = card.style();
            style
                .set_property("transition", "opacity 0.5s ease, transform 0.5s ease")
                .ok();
            style.set_property("opacity", "1").ok();
            style.set_property("transform", "translateY(0)").ok();
        });
        Ok(())
    }

    fn set_trigger(&self, selector: &str, state: &TriggerState, loaded: usize) -> Result<()> {
        let trigger = self.require_html(selector)?;
        trigger
            .set_attribute("data-loaded", &loaded.to_string())
            .map_err(js_error)?;

        let (show_trigger, show_indicator) = match state {
            TriggerState::Loading => (false, true),
            TriggerState::Ready | TriggerState::Failed(_) => (true, false),
            TriggerState::Exhausted => (false, false),
        };

        if let TriggerState::Failed(label) = state {
            trigger.set_inner_html(&format!(
                r#"<span class="load-more-text">{}</span><span class="load-more-icon">😞</span>"#,
                escape(label)
            ));
        }

        let display = |show: bool| if show { "flex" } else { "none" };
        trigger
            .style()
            .set_property("display", display(show_trigger))
            .map_err(js_error)?;

        if let Some(indicator) = self
            .query(LOADING_INDICATOR)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            indicator
                .style()
                .set_property("display", display(show_indicator))
                .map_err(js_error)?;
        }
        Ok(())
    }

    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response: Response = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| anyhow!("fetch did not return a Response"))?;

        let status = response.status();
        let text = response.text().map_err(js_error)?;
        let body = JsFuture::from(text)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        Ok(FetchResponse { status, body })
    }

    async fn next_frame(&self) {
        self.wait(|window, resolve| window.request_animation_frame(resolve).map(drop))
            .await;
    }

    async fn sleep(&self, ms: u32) {
        let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
        self.wait(|window, resolve| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(resolve, timeout)
                .map(drop)
        })
        .await;
    }
}
