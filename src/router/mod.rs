//! View Router
//!
//! Decides which view an address or click refers to, fetches the view's
//! fragment, rewrites its asset references for the deployment base path,
//! injects it into the page container and hands over to the view's
//! initializer.
//!
//! # Navigation
//!
//! - [`Router::navigate`]: explicit in-app navigation, pushes history
//! - [`Router::handle_route`]: initial load and back/forward, never pushes
//!
//! Both commit the request to the router state, update the breadcrumb and
//! the active nav item, then load the view. A failed fetch falls back to
//! the `404` fragment exactly once.
//!
//! # Overlapping navigations
//!
//! Loads are not serialized. Each load takes a generation ticket and only
//! the newest one may write the container, so the last navigation wins and
//! overtaken fetches are dropped when they complete.

mod error;
mod registry;
mod resolve;
mod rewrite;
mod state;
mod view;

pub use error::{FetchError, FetchResult, RegistryError, RouterError};
pub use registry::{BreadcrumbLabels, ViewRegistry, DEFAULT_VIEWS};
pub use resolve::{
    encode_address, resolve, resolve_location, BasePath, Location, BLOG_HASH_PREFIX,
};
pub use rewrite::{AssetRewriter, DEFAULT_ASSET_PREFIX};
pub use state::{LoadPhase, LoadTicket, RouterState};
pub use view::{NavigationRequest, ViewId};

use crate::host::{Dom, FragmentSource, History, HistoryEntry};
use crate::html::escape_html;
use crate::views::{InitOutcome, InitializerMap, ViewContext};

/// Maximum initializer redirects followed by one navigation
pub const MAX_REDIRECTS: usize = 4;

/// Element ids and classes the router writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Element whose content is replaced by each view
    pub container_id: String,
    /// Element showing the current view's label
    pub breadcrumbs_id: String,
    /// Class set on the container while a fragment loads
    pub loading_class: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            container_id: "app-content".to_string(),
            breadcrumbs_id: "breadcrumbs".to_string(),
            loading_class: "loading".to_string(),
        }
    }
}

/// Everything a router needs besides its hosts
#[derive(Debug, Clone, Default)]
pub struct RouterSettings {
    pub base_path: BasePath,
    pub registry: ViewRegistry,
    pub labels: BreadcrumbLabels,
    pub asset_prefix: Option<String>,
    pub layout: PageLayout,
}

/// How a navigation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The view was rendered and initialized
    Rendered { view: ViewId },
    /// The view's fragment failed; the `404` view was rendered instead
    FellBack { requested: ViewId, error: FetchError },
    /// Nothing could be rendered; the container keeps its prior content
    Failed { view: ViewId, error: RouterError },
    /// A newer navigation started before this one's fetch completed
    Superseded { view: ViewId },
    /// The page has no view container
    Skipped { view: ViewId },
}

impl RenderOutcome {
    /// The view this navigation was for
    pub fn view(&self) -> &ViewId {
        match self {
            RenderOutcome::Rendered { view }
            | RenderOutcome::Failed { view, .. }
            | RenderOutcome::Superseded { view }
            | RenderOutcome::Skipped { view } => view,
            RenderOutcome::FellBack { requested, .. } => requested,
        }
    }

    /// True when something was written to the container
    pub fn is_rendered(&self) -> bool {
        matches!(
            self,
            RenderOutcome::Rendered { .. } | RenderOutcome::FellBack { .. }
        )
    }
}

enum LoadStep {
    Done(RenderOutcome),
    Redirect(NavigationRequest),
}

/// Sets the loading class for as long as any load is in flight
struct LoadingGuard<'a, D: Dom> {
    state: &'a RouterState,
    dom: &'a D,
    layout: &'a PageLayout,
}

impl<'a, D: Dom> LoadingGuard<'a, D> {
    fn acquire(state: &'a RouterState, dom: &'a D, layout: &'a PageLayout) -> Self {
        state.enter_load();
        dom.set_class(&layout.container_id, &layout.loading_class, true);
        Self { state, dom, layout }
    }
}

impl<D: Dom> Drop for LoadingGuard<'_, D> {
    fn drop(&mut self) {
        if self.state.exit_load() {
            self.dom
                .set_class(&self.layout.container_id, &self.layout.loading_class, false);
        }
    }
}

/// The view router
pub struct Router<S, D, H> {
    registry: ViewRegistry,
    labels: BreadcrumbLabels,
    rewriter: AssetRewriter,
    layout: PageLayout,
    initializers: InitializerMap,
    state: RouterState,
    source: S,
    dom: D,
    history: H,
}

impl<S, D, H> Router<S, D, H>
where
    S: FragmentSource,
    D: Dom,
    H: History,
{
    /// Create a router without initializers
    pub fn new(settings: RouterSettings, source: S, dom: D, history: H) -> Self {
        let rewriter = settings
            .asset_prefix
            .as_deref()
            .map(AssetRewriter::new)
            .unwrap_or_default();

        Self {
            registry: settings.registry,
            labels: settings.labels,
            rewriter,
            layout: settings.layout,
            initializers: InitializerMap::new(),
            state: RouterState::new(settings.base_path),
            source,
            dom,
            history,
        }
    }

    pub fn with_initializers(mut self, initializers: InitializerMap) -> Self {
        self.initializers = initializers;
        self
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn base_path(&self) -> &BasePath {
        self.state.base_path()
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn current_view(&self) -> ViewId {
        self.state.current_view()
    }

    /// URL fetched for a view; unregistered views map to the `404` fragment
    pub fn fragment_url(&self, view: &ViewId) -> String {
        let view = self.registry.canonicalize(view.as_str());
        let path = self.registry.fragment_path(&view).unwrap_or_default();
        self.base_path().join(path)
    }

    /// Resolve the current address
    pub fn resolve_current(&self) -> NavigationRequest {
        resolve_location(&self.history.location(), self.base_path(), &self.registry)
    }

    /// Explicit navigation (clicks, palette, buttons). Pushes history.
    pub async fn navigate(&self, view: &str, param: Option<&str>) -> RenderOutcome {
        let request = NavigationRequest {
            view: ViewId::new(view),
            param: param.map(str::to_string),
        };
        self.run(request, true).await
    }

    /// Explicit navigation from a request value
    pub async fn dispatch(&self, request: NavigationRequest) -> RenderOutcome {
        self.run(request, true).await
    }

    /// Passive navigation (initial load, back/forward). Never pushes history.
    pub async fn handle_route(&self) -> RenderOutcome {
        let request = self.resolve_current();
        tracing::debug!(
            "Routing {:?} to {} ({:?})",
            self.history.location(),
            request.view,
            request.param
        );
        self.run(request, false).await
    }

    async fn run(&self, request: NavigationRequest, push: bool) -> RenderOutcome {
        let mut request = request;
        let mut push = push;

        for _ in 0..=MAX_REDIRECTS {
            let (view, param) = self.canonical(request);
            self.commit(&view, param.as_deref(), push);

            match self.load(&view, param.as_deref()).await {
                LoadStep::Done(outcome) => return outcome,
                LoadStep::Redirect(next) => {
                    tracing::debug!("View {} redirected to {}", view, next.view);
                    request = next;
                    push = true;
                }
            }
        }

        tracing::error!("Too many redirects navigating to {}", request.view);
        RenderOutcome::Failed {
            view: request.view.clone(),
            error: RouterError::RedirectLoop(request.view.to_string()),
        }
    }

    /// Map unregistered views onto `404`, dropping their parameter
    fn canonical(&self, request: NavigationRequest) -> (ViewId, Option<String>) {
        if self.registry.contains(request.view.as_str()) {
            (request.view, request.param)
        } else {
            tracing::debug!("Unknown view {}, showing 404", request.view);
            (ViewId::not_found(), None)
        }
    }

    fn commit(&self, view: &ViewId, param: Option<&str>, push: bool) {
        self.state.commit(view.clone(), param.map(str::to_string));

        if push {
            let url = encode_address(view, param, self.base_path());
            self.history.push(&HistoryEntry::new(view.clone(), param), &url);
        }

        self.update_breadcrumbs(view);
        self.dom.mark_active_nav(view.as_str());
    }

    fn update_breadcrumbs(&self, view: &ViewId) {
        let html = format!(
            r#"<span class="breadcrumb-item">{}</span>"#,
            escape_html(self.labels.label(view))
        );
        self.dom.set_inner_html(&self.layout.breadcrumbs_id, &html);
    }

    async fn load(&self, view: &ViewId, param: Option<&str>) -> LoadStep {
        if !self.dom.has_element(&self.layout.container_id) {
            tracing::debug!("No #{} element, skipping load", self.layout.container_id);
            return LoadStep::Done(RenderOutcome::Skipped { view: view.clone() });
        }

        let ticket = self.state.begin_load();
        let _loading = LoadingGuard::acquire(&self.state, &self.dom, &self.layout);

        let mut target = view.clone();
        let mut fallback_error = None;

        let html = loop {
            let url = self.fragment_url(&target);
            match self.source.fetch(&url).await {
                Ok(html) => break html,
                Err(error) if !self.state.is_current(ticket) => {
                    tracing::debug!("Dropping failed stale load of {}: {}", target, error);
                    return LoadStep::Done(RenderOutcome::Superseded { view: view.clone() });
                }
                Err(error) if fallback_error.is_none() && !target.is_not_found() => {
                    tracing::warn!("Error loading view {}: {}", target, error);
                    fallback_error = Some(error);
                    target = ViewId::not_found();
                    self.state.set_phase(LoadPhase::LoadingFallback);
                }
                Err(error) => {
                    tracing::error!("Error loading view {}: {}", target, error);
                    return LoadStep::Done(RenderOutcome::Failed {
                        view: view.clone(),
                        error: RouterError::FragmentUnavailable {
                            view: target.to_string(),
                            source: error,
                        },
                    });
                }
            }
        };

        if !self.state.is_current(ticket) {
            tracing::debug!("Dropping stale load of {}", target);
            return LoadStep::Done(RenderOutcome::Superseded { view: view.clone() });
        }

        let html = self.rewriter.rewrite(&html, self.base_path());
        self.dom.set_inner_html(&self.layout.container_id, &html);
        self.state.set_phase(LoadPhase::Rendered);

        let param = if target == *view { param } else { None };
        if let Some(next) = self.initialize(&target, param).await {
            return LoadStep::Redirect(next);
        }

        self.dom.scroll_to_top();

        LoadStep::Done(match fallback_error {
            Some(error) => RenderOutcome::FellBack {
                requested: view.clone(),
                error,
            },
            None => RenderOutcome::Rendered { view: target },
        })
    }

    async fn initialize(&self, view: &ViewId, param: Option<&str>) -> Option<NavigationRequest> {
        let initializer = self.initializers.get(view)?;
        let cx = ViewContext {
            dom: &self.dom,
            base_path: self.base_path(),
            param,
        };

        match initializer.initialize(&cx).await {
            InitOutcome::Ready => None,
            InitOutcome::Redirect(next) => Some(next),
        }
    }
}

#[cfg(test)]
mod tests;
