//! View registry and breadcrumb labels
//!
//! The registry maps every navigable view to the fragment that backs it.
//! It is built once and never mutated; a `404` entry is mandatory because
//! every unresolvable navigation lands there.

use std::collections::BTreeMap;

use super::error::RegistryError;
use super::view::ViewId;

/// Views shipped with the site, in navigation order
pub const DEFAULT_VIEWS: &[&str] = &[
    "home",
    "projects",
    "solutions",
    "milestones",
    "blog",
    "blog-post",
    "contact",
    "feedback",
    "about",
    "legal",
    "404",
];

/// Immutable mapping from view identifier to fragment path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegistry {
    routes: BTreeMap<ViewId, String>,
}

impl ViewRegistry {
    /// Build a registry from `(view, fragment path)` pairs.
    ///
    /// Later entries override earlier ones with the same view id.
    pub fn from_entries<I, V, P>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (V, P)>,
        V: Into<ViewId>,
        P: Into<String>,
    {
        let mut routes = BTreeMap::new();
        for (view, path) in entries {
            let view = view.into();
            let path = path.into();
            if path.trim().is_empty() {
                return Err(RegistryError::EmptyPath(view.to_string()));
            }
            routes.insert(view, path);
        }

        if !routes.contains_key(&ViewId::not_found()) {
            return Err(RegistryError::MissingNotFound);
        }

        Ok(Self { routes })
    }

    /// Default site table: every view maps to `views/<id>.html`
    pub fn site_default() -> Self {
        let routes = DEFAULT_VIEWS
            .iter()
            .map(|id| (ViewId::new(*id), format!("views/{}.html", id)))
            .collect();
        Self { routes }
    }

    /// Return a copy of this registry with extra or overridden entries
    pub fn extended<I, V, P>(&self, overrides: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (V, P)>,
        V: Into<ViewId>,
        P: Into<String>,
    {
        let current = self
            .routes
            .iter()
            .map(|(view, path)| (view.clone(), path.clone()));
        let extra = overrides
            .into_iter()
            .map(|(view, path)| (view.into(), path.into()));
        Self::from_entries(current.chain(extra))
    }

    pub fn contains(&self, view: &str) -> bool {
        self.routes.contains_key(&ViewId::new(view))
    }

    pub fn fragment_path(&self, view: &ViewId) -> Option<&str> {
        self.routes.get(view).map(String::as_str)
    }

    /// Map a requested id onto a registered one, substituting `404`
    pub fn canonicalize(&self, view: &str) -> ViewId {
        if self.contains(view) {
            ViewId::new(view)
        } else {
            ViewId::not_found()
        }
    }

    pub fn views(&self) -> impl Iterator<Item = (&ViewId, &str)> {
        self.routes.iter().map(|(view, path)| (view, path.as_str()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::site_default()
    }
}

/// Human-readable breadcrumb labels per view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbLabels {
    labels: BTreeMap<ViewId, String>,
}

impl BreadcrumbLabels {
    /// Label shown for views without an entry
    pub const FALLBACK: &'static str = "Home";

    pub fn site_default() -> Self {
        let labels = [
            ("home", "Home"),
            ("projects", "Projects"),
            ("solutions", "Solutions"),
            ("milestones", "Milestones"),
            ("blog", "Blog"),
            ("blog-post", "Blog"),
            ("contact", "Contact"),
            ("feedback", "Feedback"),
            ("about", "About"),
            ("legal", "Legal"),
            ("404", "404"),
        ]
        .into_iter()
        .map(|(view, label)| (ViewId::new(view), label.to_string()))
        .collect();
        Self { labels }
    }

    pub fn with_overrides<I, V, L>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<ViewId>,
        L: Into<String>,
    {
        for (view, label) in overrides {
            self.labels.insert(view.into(), label.into());
        }
        self
    }

    pub fn label(&self, view: &ViewId) -> &str {
        self.labels
            .get(view)
            .map(String::as_str)
            .unwrap_or(Self::FALLBACK)
    }
}

impl Default for BreadcrumbLabels {
    fn default() -> Self {
        Self::site_default()
    }
}
