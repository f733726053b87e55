//! Location resolution
//!
//! Pure functions deciding which view a browser address refers to, and
//! the inverse: which address a navigation should push.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::registry::ViewRegistry;
use super::view::{NavigationRequest, ViewId};

/// Hash prefix reserved for blog posts (`#blog-<slug>`)
pub const BLOG_HASH_PREFIX: &str = "blog-";

/// Deployment prefix, always starting and ending in `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct BasePath(String);

impl BasePath {
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Normalize an arbitrary prefix: `OK-DEVS`, `/OK-DEVS` and `/OK-DEVS/`
    /// all become `/OK-DEVS/`; blank input is the root.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            Self::root()
        } else {
            Self(format!("/{}/", trimmed))
        }
    }

    /// Detect the base path from the page pathname.
    ///
    /// A pathname under one of the `known` deployment prefixes uses that
    /// prefix; anything else is served from the root.
    pub fn detect<S: AsRef<str>>(pathname: &str, known: &[S]) -> Self {
        for prefix in known {
            let prefix = BasePath::new(prefix.as_ref());
            if prefix.is_root() {
                continue;
            }
            let bare = prefix.0.trim_end_matches('/');
            if pathname == bare || pathname.starts_with(&prefix.0) {
                return prefix;
            }
        }
        Self::root()
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix for site-relative URLs: empty at the root, the base otherwise
    pub fn url_prefix(&self) -> &str {
        if self.is_root() {
            ""
        } else {
            &self.0
        }
    }

    /// URL of a file in the assets directory, e.g. `assets/ms1.png`
    pub fn asset_url(&self, file: &str) -> String {
        format!("{}assets/{}", self.url_prefix(), file.trim_start_matches('/'))
    }

    /// URL of a fragment: relative at the root, base-prefixed otherwise
    pub fn join(&self, relative: &str) -> String {
        format!("{}{}", self.url_prefix(), relative)
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BasePath {
    fn from(raw: String) -> Self {
        BasePath::new(&raw)
    }
}

impl From<BasePath> for String {
    fn from(base: BasePath) -> Self {
        base.0
    }
}

/// The parts of the browser address the router reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Fragment without the leading `#`
    pub hash: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, hash: impl Into<String>) -> Self {
        let hash: String = hash.into();
        Self {
            pathname: pathname.into(),
            hash: hash.trim_start_matches('#').to_string(),
        }
    }

    /// Parse an address such as `/OK-DEVS/#blog-x` or `#projects`.
    ///
    /// A bare `#fragment` keeps `current_pathname`.
    pub fn from_address(address: &str, current_pathname: &str) -> Self {
        let (path, hash) = match address.split_once('#') {
            Some((path, hash)) => (path, hash),
            None => (address, ""),
        };
        let path = path.split('?').next().unwrap_or_default();
        let pathname = if path.is_empty() {
            current_pathname.to_string()
        } else {
            path.to_string()
        };
        Self::new(pathname, hash)
    }
}

/// Resolve an address to a registered view.
///
/// The hash wins over the path. A hash naming a registered view resolves to
/// it directly; otherwise `blog-<slug>` selects `blog-post` with the slug as
/// parameter. Without a hash the path is stripped of the base and of any
/// surrounding slashes: empty or `index.html` means `home`, anything else
/// minus `.html` is the view id. Unregistered ids resolve to `404`.
pub fn resolve(
    hash: &str,
    path: &str,
    base: &BasePath,
    registry: &ViewRegistry,
) -> NavigationRequest {
    let hash = hash.trim_start_matches('#');

    let request = if !hash.is_empty() {
        match hash.strip_prefix(BLOG_HASH_PREFIX) {
            Some(slug) if !slug.is_empty() && !registry.contains(hash) => {
                let slug = urlencoding::decode(slug)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| slug.to_string());
                NavigationRequest::with_param(ViewId::blog_post(), slug)
            }
            _ => NavigationRequest::new(hash),
        }
    } else {
        let rest = path
            .strip_prefix(base.as_str())
            .or_else(|| path.strip_prefix('/'))
            .unwrap_or(path)
            .trim_matches('/');

        if rest.is_empty() || rest == "index.html" {
            NavigationRequest::new(ViewId::home())
        } else {
            NavigationRequest::new(rest.strip_suffix(".html").unwrap_or(rest))
        }
    };

    if registry.contains(request.view.as_str()) {
        request
    } else {
        NavigationRequest::not_found()
    }
}

/// Resolve a [`Location`] against a registry
pub fn resolve_location(
    location: &Location,
    base: &BasePath,
    registry: &ViewRegistry,
) -> NavigationRequest {
    resolve(&location.hash, &location.pathname, base, registry)
}

/// Address pushed to the history for a navigation.
///
/// `home` is the bare base path, a blog post with a slug is `#blog-<slug>`,
/// every other view is `#<view>`; hashes carry the base prefix when the site
/// is not served from the root.
pub fn encode_address(view: &ViewId, param: Option<&str>, base: &BasePath) -> String {
    if view.is_home() {
        return base.as_str().to_string();
    }

    match param {
        Some(slug) if view.is_blog_post() => {
            format!(
                "{}#{}{}",
                base.url_prefix(),
                BLOG_HASH_PREFIX,
                urlencoding::encode(slug)
            )
        }
        _ => format!("{}#{}", base.url_prefix(), view),
    }
}
