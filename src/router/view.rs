//! View identifiers and navigation requests

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a routable view (`home`, `projects`, `blog-post`, `404`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub const HOME: &'static str = "home";
    pub const BLOG: &'static str = "blog";
    pub const BLOG_POST: &'static str = "blog-post";
    pub const NOT_FOUND: &'static str = "404";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn home() -> Self {
        Self::new(Self::HOME)
    }

    pub fn not_found() -> Self {
        Self::new(Self::NOT_FOUND)
    }

    pub fn blog_post() -> Self {
        Self::new(Self::BLOG_POST)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_home(&self) -> bool {
        self.0 == Self::HOME
    }

    pub fn is_not_found(&self) -> bool {
        self.0 == Self::NOT_FOUND
    }

    pub fn is_blog_post(&self) -> bool {
        self.0 == Self::BLOG_POST
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ViewId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ViewId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ViewId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A request to show a view, optionally with a secondary parameter
/// (the blog slug for `blog-post`).
///
/// Produced by clicks on navigation triggers, history events, direct URL
/// loads, the command palette and initializer redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub view: ViewId,
    pub param: Option<String>,
}

impl NavigationRequest {
    pub fn new(view: impl Into<ViewId>) -> Self {
        Self {
            view: view.into(),
            param: None,
        }
    }

    pub fn with_param(view: impl Into<ViewId>, param: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            param: Some(param.into()),
        }
    }

    /// Build a request from the raw `data-view` / `data-blog-slug` attribute
    /// pair of a navigation trigger. Blank slugs are ignored.
    pub fn from_trigger(view: &str, slug: Option<&str>) -> Self {
        let param = slug
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            view: ViewId::new(view.trim()),
            param,
        }
    }

    pub fn not_found() -> Self {
        Self::new(ViewId::not_found())
    }

    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }
}
