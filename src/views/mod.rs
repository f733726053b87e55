//! View Initializers
//!
//! After the router injects a view's fragment it hands over to the
//! initializer registered for that view, which fills element slots inside
//! the fragment from the site data:
//! - `home`: recent milestones
//! - `projects` / `solutions`: card grids
//! - `milestones`: the full timeline
//! - `blog` / `blog-post`: post list and single post
//!
//! Initializers are selected by view id from an [`InitializerMap`]; a view
//! without one is simply not initialized.

mod blog;
mod cards;
mod home;
mod milestones;

pub use blog::{display_date, BlogInitializer, BlogPostInitializer};
pub use cards::{ProjectsInitializer, SolutionsInitializer};
pub use home::HomeInitializer;
pub use milestones::{timeline_progress, MilestonesInitializer, TIMELINE_LINE_ID};

use async_trait::async_trait;
use std::collections::HashMap;

use crate::data::SiteData;
use crate::host::Dom;
use crate::router::{BasePath, NavigationRequest, ViewId};

/// What an initializer sees of the page
pub struct ViewContext<'a> {
    pub dom: &'a dyn Dom,
    pub base_path: &'a BasePath,
    /// Secondary parameter of the navigation (the blog slug)
    pub param: Option<&'a str>,
}

/// Result of initializing a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Ready,
    /// Show another view instead (e.g. unknown blog slug)
    Redirect(NavigationRequest),
}

/// Per-view behaviour run after the fragment is in the page
#[async_trait(?Send)]
pub trait ViewInitializer {
    async fn initialize(&self, cx: &ViewContext<'_>) -> InitOutcome;
}

/// Initializers keyed by view id
#[derive(Default)]
pub struct InitializerMap {
    initializers: HashMap<ViewId, Box<dyn ViewInitializer>>,
}

impl InitializerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializers for every data-driven view of the site
    pub fn site_default(data: SiteData) -> Self {
        Self::new()
            .register("home", HomeInitializer::new(data.milestones))
            .register("projects", ProjectsInitializer::new(data.projects))
            .register("solutions", SolutionsInitializer::new(data.solutions))
            .register("milestones", MilestonesInitializer::new(data.milestones))
            .register(ViewId::BLOG, BlogInitializer::new(data.posts))
            .register(ViewId::BLOG_POST, BlogPostInitializer::new(data.posts))
    }

    pub fn register<I>(mut self, view: impl Into<ViewId>, initializer: I) -> Self
    where
        I: ViewInitializer + 'static,
    {
        self.insert(view, initializer);
        self
    }

    pub fn insert<I>(&mut self, view: impl Into<ViewId>, initializer: I)
    where
        I: ViewInitializer + 'static,
    {
        self.initializers.insert(view.into(), Box::new(initializer));
    }

    pub fn get(&self, view: &ViewId) -> Option<&dyn ViewInitializer> {
        self.initializers.get(view).map(|init| init.as_ref())
    }

    pub fn contains(&self, view: &str) -> bool {
        self.initializers.contains_key(&ViewId::new(view))
    }

    pub fn len(&self) -> usize {
        self.initializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initializers.is_empty()
    }
}

impl std::fmt::Debug for InitializerMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut views: Vec<&str> = self.initializers.keys().map(ViewId::as_str).collect();
        views.sort_unstable();
        f.debug_struct("InitializerMap").field("views", &views).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SiteData;

    #[test]
    fn test_site_default_covers_data_views() {
        let map = InitializerMap::site_default(SiteData::site());
        for view in ["home", "projects", "solutions", "milestones", "blog", "blog-post"] {
            assert!(map.contains(view), "missing initializer for {}", view);
        }
        assert!(!map.contains("contact"));
        assert_eq!(map.len(), 6);
    }
}
