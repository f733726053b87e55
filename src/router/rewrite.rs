//! Asset path rewriting for sub-path deployments
//!
//! Fragments reference assets relative to the site root
//! (`<img src="assets/logo.svg">`). Injected into a page served from
//! `/OK-DEVS/`, those references must carry the base path.

use regex::{Captures, Regex};
use std::borrow::Cow;

use super::resolve::BasePath;

/// Default assets directory prefix
pub const DEFAULT_ASSET_PREFIX: &str = "assets/";

/// Rewrites relative `src`/`href` asset references onto a base path
#[derive(Debug, Clone)]
pub struct AssetRewriter {
    pattern: Regex,
}

impl AssetRewriter {
    /// Build a rewriter for references starting with `prefix`
    pub fn new(prefix: &str) -> Self {
        let prefix = prefix.trim_start_matches('/');
        let pattern = format!(
            r#"\b(?P<attr>src|href)=(?P<quote>["'])(?P<path>{})"#,
            regex::escape(prefix)
        );
        Self {
            pattern: Regex::new(&pattern).expect("asset prefix is escaped"),
        }
    }

    /// Rewrite `html` for `base`. Root deployments are returned untouched,
    /// as are absolute paths and `http(s)://` URLs.
    pub fn rewrite<'a>(&self, html: &'a str, base: &BasePath) -> Cow<'a, str> {
        if base.is_root() {
            return Cow::Borrowed(html);
        }

        self.pattern.replace_all(html, |caps: &Captures<'_>| {
            format!(
                "{}={}{}{}",
                &caps["attr"],
                &caps["quote"],
                base.as_str(),
                &caps["path"]
            )
        })
    }
}

impl Default for AssetRewriter {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_PREFIX)
    }
}
