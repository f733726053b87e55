//! Host Seams
//!
//! The router never touches a browser API directly. It talks to three
//! capabilities supplied by whoever embeds it:
//! - [`FragmentSource`]: fetches view fragments
//! - [`Dom`]: reads and writes elements by id
//! - [`History`]: reads the address and pushes history entries
//!
//! The WASM frontend implements them over `web-sys`; this crate ships
//! in-memory hosts for tests and the CLI, plus directory and HTTP sources
//! behind the `native` feature.

mod memory;

#[cfg(feature = "native")]
mod fs;
#[cfg(feature = "native")]
mod http;

pub use memory::{MemoryDom, MemoryHistory, StaticSource};

#[cfg(feature = "native")]
pub use fs::DirSource;
#[cfg(feature = "native")]
pub use http::HttpSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::router::{FetchResult, Location, ViewId};

/// Fetches the markup of a view fragment
#[async_trait(?Send)]
pub trait FragmentSource {
    /// Fetch `url`; any non-success status is an error
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// Element access by id.
///
/// Every method is a no-op returning `false` when the element is absent.
pub trait Dom {
    fn has_element(&self, id: &str) -> bool;

    fn set_inner_html(&self, id: &str, html: &str) -> bool;

    fn set_text(&self, id: &str, text: &str) -> bool;

    /// Add (`enabled`) or remove a class
    fn set_class(&self, id: &str, class: &str, enabled: bool) -> bool;

    /// Mark the `.nav-item` elements whose `data-view` equals `view` as
    /// active and clear the rest
    fn mark_active_nav(&self, view: &str);

    /// Smooth-scroll the viewport to the top
    fn scroll_to_top(&self);
}

/// Browser history access
pub trait History {
    fn location(&self) -> Location;

    /// Push a new entry; the address bar shows `url` afterwards
    fn push(&self, entry: &HistoryEntry, url: &str);
}

/// State object stored with each pushed history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub view: ViewId,
    #[serde(rename = "blogSlug", skip_serializing_if = "Option::is_none", default)]
    pub blog_slug: Option<String>,
}

impl HistoryEntry {
    pub fn new(view: ViewId, param: Option<&str>) -> Self {
        let blog_slug = if view.is_blog_post() {
            param.map(str::to_string)
        } else {
            None
        };
        Self { view, blog_slug }
    }
}
