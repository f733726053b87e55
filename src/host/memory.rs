//! In-memory hosts
//!
//! A document, a history and a fragment source that live entirely in
//! memory. Used by the test suites and by `okdevs render`.

use async_trait::async_trait;
use regex::Regex;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::{Dom, FragmentSource, History, HistoryEntry};
use crate::html::escape_html;
use crate::router::{FetchError, FetchResult, Location, PageLayout};

#[derive(Debug, Default)]
struct Element {
    html: String,
    classes: BTreeSet<String>,
    /// Ids discovered in markup injected into this element
    children: Vec<String>,
}

#[derive(Debug)]
struct NavItem {
    view: String,
    active: bool,
}

/// Flat id-indexed document.
///
/// Markup written with [`Dom::set_inner_html`] is scanned for `id="..."`
/// attributes and each id becomes an (empty) element, so initializers that
/// target elements inside a fragment find them. Replacing the markup drops
/// the previously discovered ids.
#[derive(Debug)]
pub struct MemoryDom {
    elements: RefCell<BTreeMap<String, Element>>,
    nav_items: RefCell<Vec<NavItem>>,
    scrolls: Cell<usize>,
    id_pattern: Regex,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            elements: RefCell::new(BTreeMap::new()),
            nav_items: RefCell::new(Vec::new()),
            scrolls: Cell::new(0),
            id_pattern: Regex::new(r#"\bid\s*=\s*["']([^"']+)["']"#).expect("valid id pattern"),
        }
    }

    /// Document with the layout's container and breadcrumb elements
    pub fn for_layout(layout: &PageLayout) -> Self {
        Self::new()
            .with_element(&layout.container_id)
            .with_element(&layout.breadcrumbs_id)
    }

    pub fn with_element(self, id: &str) -> Self {
        self.elements
            .borrow_mut()
            .insert(id.to_string(), Element::default());
        self
    }

    /// Add one `.nav-item` per view
    pub fn with_nav_items<I, S>(self, views: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nav_items
            .borrow_mut()
            .extend(views.into_iter().map(|view| NavItem {
                view: view.into(),
                active: false,
            }));
        self
    }

    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|el| el.html.clone())
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .borrow()
            .get(id)
            .is_some_and(|el| el.classes.contains(class))
    }

    /// Views of the nav items currently marked active
    pub fn active_nav(&self) -> Vec<String> {
        self.nav_items
            .borrow()
            .iter()
            .filter(|item| item.active)
            .map(|item| item.view.clone())
            .collect()
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls.get()
    }

    /// Ids discovered inside `id`'s markup, in document order
    pub fn children(&self, id: &str) -> Vec<String> {
        self.elements
            .borrow()
            .get(id)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    fn remove_subtree(elements: &mut BTreeMap<String, Element>, id: &str) {
        let children = elements
            .get_mut(id)
            .map(|el| std::mem::take(&mut el.children))
            .unwrap_or_default();
        for child in children {
            Self::remove_subtree(elements, &child);
            elements.remove(&child);
        }
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for MemoryDom {
    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        let mut elements = self.elements.borrow_mut();
        if !elements.contains_key(id) {
            return false;
        }

        Self::remove_subtree(&mut elements, id);

        // Ids already elsewhere in the document keep their element
        let mut children = Vec::new();
        for caps in self.id_pattern.captures_iter(html) {
            let child = &caps[1];
            if child == id || elements.contains_key(child) {
                continue;
            }
            elements.insert(child.to_string(), Element::default());
            children.push(child.to_string());
        }

        if let Some(el) = elements.get_mut(id) {
            el.html = html.to_string();
            el.children = children;
        }
        true
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        let mut elements = self.elements.borrow_mut();
        if !elements.contains_key(id) {
            return false;
        }
        Self::remove_subtree(&mut elements, id);
        if let Some(el) = elements.get_mut(id) {
            el.html = escape_html(text);
        }
        true
    }

    fn set_class(&self, id: &str, class: &str, enabled: bool) -> bool {
        match self.elements.borrow_mut().get_mut(id) {
            Some(el) => {
                if enabled {
                    el.classes.insert(class.to_string());
                } else {
                    el.classes.remove(class);
                }
                true
            }
            None => false,
        }
    }

    fn mark_active_nav(&self, view: &str) {
        for item in self.nav_items.borrow_mut().iter_mut() {
            item.active = item.view == view;
        }
    }

    fn scroll_to_top(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
}

/// History that records pushed entries and tracks the resulting address
#[derive(Debug)]
pub struct MemoryHistory {
    location: RefCell<Location>,
    entries: RefCell<Vec<(HistoryEntry, String)>>,
}

impl MemoryHistory {
    pub fn new(location: Location) -> Self {
        Self {
            location: RefCell::new(location),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn at(pathname: &str, hash: &str) -> Self {
        Self::new(Location::new(pathname, hash))
    }

    /// Move the address without pushing (back/forward, manual edits)
    pub fn set_location(&self, location: Location) {
        *self.location.borrow_mut() = location;
    }

    pub fn entries(&self) -> Vec<(HistoryEntry, String)> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        self.location.borrow().clone()
    }

    fn push(&self, entry: &HistoryEntry, url: &str) {
        let next = Location::from_address(url, &self.location.borrow().pathname);
        *self.location.borrow_mut() = next;
        self.entries
            .borrow_mut()
            .push((entry.clone(), url.to_string()));
    }
}

/// Fragment source backed by a map of URL to markup.
///
/// Unknown URLs answer with status 404; URLs registered as failing produce
/// a transport error. Every request is recorded.
#[derive(Debug, Default)]
pub struct StaticSource {
    fragments: HashMap<String, String>,
    failing: HashSet<String>,
    requests: RefCell<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fragment(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.fragments.insert(url.into(), html.into());
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl FragmentSource for StaticSource {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.requests.borrow_mut().push(url.to_string());

        if self.failing.contains(url) {
            return Err(FetchError::transport(url, "connection refused"));
        }

        self.fragments
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::status(url, 404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_dom_registers_fragment_ids() {
        let dom = MemoryDom::new().with_element("app-content");
        assert!(!dom.has_element("projectsGrid"));

        assert!(dom.set_inner_html(
            "app-content",
            r#"<section><div id="projectsGrid"></div><p id='note'></p></section>"#
        ));
        assert!(dom.has_element("projectsGrid"));
        assert!(dom.has_element("note"));
        assert_eq!(dom.children("app-content"), vec!["projectsGrid", "note"]);

        dom.set_inner_html("app-content", "<p>gone</p>");
        assert!(!dom.has_element("projectsGrid"));
        assert!(dom.has_element("app-content"));
    }

    #[test]
    fn test_memory_dom_keeps_existing_ids() {
        let dom = MemoryDom::new()
            .with_element("app-content")
            .with_element("breadcrumbs");
        dom.set_class("breadcrumbs", "trail", true);
        dom.set_text("breadcrumbs", "Home");

        dom.set_inner_html(
            "app-content",
            r#"<nav id="breadcrumbs"></nav><div id="grid"></div><div id="grid"></div>"#,
        );
        assert_eq!(dom.children("app-content"), vec!["grid"]);
        assert!(dom.has_class("breadcrumbs", "trail"));
        assert_eq!(dom.inner_html("breadcrumbs").as_deref(), Some("Home"));

        dom.set_inner_html("app-content", "<p>next</p>");
        assert!(dom.has_element("breadcrumbs"));
        assert!(!dom.has_element("grid"));
    }

    #[test]
    fn test_memory_dom_missing_elements_are_noops() {
        let dom = MemoryDom::new();
        assert!(!dom.set_inner_html("missing", "<p></p>"));
        assert!(!dom.set_text("missing", "x"));
        assert!(!dom.set_class("missing", "loading", true));
        assert_eq!(dom.inner_html("missing"), None);
    }

    #[test]
    fn test_memory_dom_classes_and_text() {
        let dom = MemoryDom::new().with_element("title");
        dom.set_class("title", "loading", true);
        assert!(dom.has_class("title", "loading"));
        dom.set_class("title", "loading", false);
        assert!(!dom.has_class("title", "loading"));

        dom.set_text("title", "Fish & Chips");
        assert_eq!(dom.inner_html("title").as_deref(), Some("Fish &amp; Chips"));
    }

    #[test]
    fn test_memory_dom_active_nav() {
        let dom = MemoryDom::new().with_nav_items(["home", "projects", "blog"]);
        dom.mark_active_nav("projects");
        assert_eq!(dom.active_nav(), vec!["projects"]);
        dom.mark_active_nav("blog-post");
        assert!(dom.active_nav().is_empty());
    }

    #[test]
    fn test_memory_history_push_updates_location() {
        let history = MemoryHistory::at("/OK-DEVS/", "");
        let entry = HistoryEntry::new("projects".into(), None);
        history.push(&entry, "/OK-DEVS/#projects");

        assert_eq!(history.location(), Location::new("/OK-DEVS/", "projects"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].1, "/OK-DEVS/#projects");
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new()
            .with_fragment("views/home.html", "<h1>Home</h1>")
            .with_failure("views/down.html");

        assert_eq!(source.fetch("views/home.html").await.unwrap(), "<h1>Home</h1>");
        assert!(matches!(
            source.fetch("views/missing.html").await,
            Err(FetchError::Status { status: 404, .. })
        ));
        assert!(matches!(
            source.fetch("views/down.html").await,
            Err(FetchError::Transport { .. })
        ));
        assert_eq!(source.requests().len(), 3);
    }
}
