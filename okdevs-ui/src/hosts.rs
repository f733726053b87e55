//! Browser Hosts
//!
//! `web-sys` implementations of the router's DOM and history seams, a
//! `gloo-net` fragment source and `localStorage` preferences.

use async_trait::async_trait;
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

use okdevs::host::{Dom, FragmentSource, History, HistoryEntry};
use okdevs::router::{FetchError, FetchResult, Location};
use okdevs::widgets::ThemeStore;

/// The live document
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl Dom for BrowserDom {
    fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        match self.element(id) {
            Some(el) => {
                el.set_inner_html(html);
                true
            }
            None => false,
        }
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        match self.element(id) {
            Some(el) => {
                el.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn set_class(&self, id: &str, class: &str, enabled: bool) -> bool {
        match self.element(id) {
            Some(el) => el.class_list().toggle_with_force(class, enabled).is_ok(),
            None => false,
        }
    }

    fn mark_active_nav(&self, view: &str) {
        let Ok(items) = self.document.query_selector_all(".nav-item") else {
            return;
        };
        for i in 0..items.length() {
            let Some(item) = items.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let active = item.get_attribute("data-view").as_deref() == Some(view);
            let _ = item.class_list().toggle_with_force("active", active);
        }
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// The window's History API
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl History for BrowserHistory {
    fn location(&self) -> Location {
        let location = self.window.location();
        Location::new(
            location.pathname().unwrap_or_else(|_| "/".to_string()),
            location.hash().unwrap_or_default(),
        )
    }

    fn push(&self, entry: &HistoryEntry, url: &str) {
        let state = serde_json::to_string(entry)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .unwrap_or(wasm_bindgen::JsValue::NULL);

        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&state, "", Some(url)));
        if let Err(e) = pushed {
            web_sys::console::error_1(&format!("pushState to {} failed: {:?}", url, e).into());
        }
    }
}

/// Fragments fetched relative to the page, like `fetch()`
pub struct GlooSource;

#[async_trait(?Send)]
impl FragmentSource for GlooSource {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        if !response.ok() {
            return Err(FetchError::status(url, response.status()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))
    }
}

/// Preferences in `window.localStorage`
pub struct LocalThemeStore;

impl LocalThemeStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl ThemeStore for LocalThemeStore {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }
}
