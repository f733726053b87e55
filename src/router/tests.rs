use super::*;
use crate::data::SiteData;
use crate::host::{Dom, FragmentSource, History, MemoryDom, MemoryHistory, StaticSource};
use crate::views::{InitOutcome, InitializerMap, ViewContext, ViewInitializer};
use async_trait::async_trait;
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::Notify;

const CONTAINER: &str = "app-content";

fn fragment_for(view: &str) -> String {
    match view {
        "home" => r#"<section class="hero"><img src="assets/hero.png"><a href="https://okdevs.dev/assets/x.png">x</a><div id="recentMilestones"></div></section>"#.to_string(),
        "projects" => r#"<h1>Projects</h1><div id="projectsGrid"></div>"#.to_string(),
        "milestones" => r#"<div id="timelineLine"></div><div id="milestonesTimeline"></div>"#.to_string(),
        "blog" => r#"<h1>Blog</h1><div id="blogGrid"></div>"#.to_string(),
        "blog-post" => r#"<h1 id="blogPostTitle"></h1><div id="blogPostMeta"></div><div id="blogPostContent"></div>"#.to_string(),
        "404" => "<h1>Page not found</h1>".to_string(),
        other => format!("<h1>{}</h1>", other),
    }
}

/// Source serving every default view except those in `skip`
fn site_source(base: &BasePath, skip: &[&str]) -> StaticSource {
    DEFAULT_VIEWS
        .iter()
        .copied()
        .filter(|view| !skip.contains(view))
        .fold(StaticSource::new(), |source, view| {
            source.with_fragment(base.join(&format!("views/{}.html", view)), fragment_for(view))
        })
}

fn settings(base: &BasePath) -> RouterSettings {
    RouterSettings {
        base_path: base.clone(),
        ..RouterSettings::default()
    }
}

fn page_dom() -> MemoryDom {
    MemoryDom::for_layout(&PageLayout::default()).with_nav_items(DEFAULT_VIEWS.iter().copied())
}

fn router_with<S: FragmentSource>(
    source: S,
    base: &BasePath,
    pathname: &str,
    hash: &str,
) -> Router<S, MemoryDom, MemoryHistory> {
    Router::new(
        settings(base),
        source,
        page_dom(),
        MemoryHistory::at(pathname, hash),
    )
    .with_initializers(InitializerMap::site_default(SiteData::site()))
}

fn site_router(pathname: &str, hash: &str) -> Router<StaticSource, MemoryDom, MemoryHistory> {
    let base = BasePath::root();
    router_with(site_source(&base, &[]), &base, pathname, hash)
}

fn container(router: &Router<impl FragmentSource, MemoryDom, MemoryHistory>) -> String {
    router.dom().inner_html(CONTAINER).unwrap_or_default()
}

#[tokio::test]
async fn test_initial_load_from_hash() {
    let router = site_router("/", "projects");

    let outcome = router.handle_route().await;

    assert_eq!(outcome, RenderOutcome::Rendered { view: "projects".into() });
    assert!(container(&router).starts_with("<h1>Projects</h1>"));
    assert_eq!(
        router
            .dom()
            .inner_html("projectsGrid")
            .unwrap()
            .matches("project-card")
            .count(),
        6
    );
    assert_eq!(
        router.dom().inner_html("breadcrumbs").as_deref(),
        Some(r#"<span class="breadcrumb-item">Projects</span>"#)
    );
    assert_eq!(router.dom().active_nav(), vec!["projects"]);
    assert_eq!(router.dom().scroll_count(), 1);
    assert!(!router.dom().has_class(CONTAINER, "loading"));
    assert_eq!(router.state().phase(), LoadPhase::Idle);
    assert!(router.history().is_empty());
}

#[tokio::test]
async fn test_initial_load_from_path() {
    let router = site_router("/milestones.html", "");
    let outcome = router.handle_route().await;

    assert_eq!(outcome.view(), "milestones");
    assert!(router
        .dom()
        .inner_html("milestonesTimeline")
        .unwrap()
        .contains("OK Devs Founded"));
}

#[tokio::test]
async fn test_handle_route_is_idempotent() {
    let router = site_router("/", "about");

    let first = router.handle_route().await;
    let rendered = container(&router);
    let second = router.handle_route().await;

    assert_eq!(first, second);
    assert_eq!(container(&router), rendered);
    assert!(router.history().is_empty());
    assert_eq!(router.source().requests(), vec!["views/about.html", "views/about.html"]);
}

#[tokio::test]
async fn test_navigate_pushes_history() {
    let router = site_router("/", "");
    router.handle_route().await;

    let outcome = router.navigate("contact", None).await;

    assert!(outcome.is_rendered());
    assert_eq!(container(&router), "<h1>contact</h1>");
    let entries = router.history().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, HistoryEntry::new("contact".into(), None));
    assert_eq!(entries[0].1, "#contact");
    assert_eq!(router.history().location(), Location::new("/", "contact"));

    // Reload reproduces the same state without another entry
    router.handle_route().await;
    assert_eq!(router.current_view(), "contact");
    assert_eq!(router.history().len(), 1);
}

#[tokio::test]
async fn test_navigate_home_under_base_path() {
    let base = BasePath::new("/OK-DEVS/");
    let router = router_with(site_source(&base, &[]), &base, "/OK-DEVS/", "legal");
    router.handle_route().await;

    router.navigate("home", None).await;

    let entries = router.history().entries();
    assert_eq!(entries.last().unwrap().1, "/OK-DEVS/");
    assert_eq!(router.history().location(), Location::new("/OK-DEVS/", ""));
}

#[tokio::test]
async fn test_unknown_view_behaves_like_not_found() {
    let unknown = site_router("/", "");
    let explicit = site_router("/", "");

    let a = unknown.navigate("nonexistent-view", Some("param")).await;
    let b = explicit.navigate("404", None).await;

    assert_eq!(a, b);
    assert_eq!(a, RenderOutcome::Rendered { view: "404".into() });
    assert_eq!(container(&unknown), container(&explicit));
    assert_eq!(unknown.history().entries(), explicit.history().entries());
    assert_eq!(
        unknown.dom().inner_html("breadcrumbs"),
        explicit.dom().inner_html("breadcrumbs")
    );
    assert_eq!(unknown.state().current_param(), None);
    assert_eq!(unknown.source().requests(), explicit.source().requests());
}

#[tokio::test]
async fn test_failed_fetch_falls_back_to_not_found_once() {
    let base = BasePath::root();
    let router = router_with(site_source(&base, &["home"]), &base, "/", "");

    let outcome = router.handle_route().await;

    assert!(matches!(
        &outcome,
        RenderOutcome::FellBack { requested, error: FetchError::Status { status: 404, .. } }
            if requested == "home"
    ));
    assert_eq!(router.source().requests(), vec!["views/home.html", "views/404.html"]);
    assert_eq!(container(&router), "<h1>Page not found</h1>");
    assert!(!router.dom().has_class(CONTAINER, "loading"));
    // The resolved view stays current; only the content fell back
    assert_eq!(router.current_view(), "home");
}

#[tokio::test]
async fn test_failed_fallback_keeps_prior_content() {
    let source = StaticSource::new().with_failure("views/home.html");
    let base = BasePath::root();
    let router = router_with(source, &base, "/", "");
    router.dom().set_inner_html(CONTAINER, "<p>previous</p>");

    let outcome = router.handle_route().await;

    assert!(matches!(
        outcome,
        RenderOutcome::Failed {
            error: RouterError::FragmentUnavailable { .. },
            ..
        }
    ));
    assert_eq!(router.source().requests(), vec!["views/home.html", "views/404.html"]);
    assert_eq!(container(&router), "<p>previous</p>");
    assert!(!router.dom().has_class(CONTAINER, "loading"));
    assert_eq!(router.dom().scroll_count(), 0);
}

#[tokio::test]
async fn test_failing_not_found_view_is_fetched_once() {
    let base = BasePath::root();
    let router = router_with(StaticSource::new(), &base, "/", "");

    let outcome = router.navigate("404", None).await;

    assert!(matches!(outcome, RenderOutcome::Failed { .. }));
    assert_eq!(router.source().requests(), vec!["views/404.html"]);
}

#[tokio::test]
async fn test_assets_rewritten_under_base_path() {
    let base = BasePath::new("/OK-DEVS/");
    let router = router_with(site_source(&base, &[]), &base, "/OK-DEVS/", "");

    let outcome = router.handle_route().await;

    assert_eq!(outcome.view(), "home");
    assert_eq!(router.source().requests(), vec!["/OK-DEVS/views/home.html"]);
    let html = container(&router);
    assert!(html.contains(r#"<img src="/OK-DEVS/assets/hero.png">"#));
    assert!(html.contains(r#"href="https://okdevs.dev/assets/x.png""#));
    assert!(router
        .dom()
        .inner_html("recentMilestones")
        .unwrap()
        .contains(r#"src="/OK-DEVS/assets/ms1.png""#));
}

#[tokio::test]
async fn test_blog_post_from_hash() {
    let router = site_router("/", "blog-minimal-design-maximal-impact");

    let outcome = router.handle_route().await;

    assert_eq!(outcome, RenderOutcome::Rendered { view: "blog-post".into() });
    assert_eq!(
        router.state().current_param().as_deref(),
        Some("minimal-design-maximal-impact")
    );
    assert_eq!(
        router.dom().inner_html("blogPostTitle").unwrap(),
        "Minimal Design, Maximal Impact"
    );
    assert_eq!(
        router.dom().inner_html("breadcrumbs").as_deref(),
        Some(r#"<span class="breadcrumb-item">Blog</span>"#)
    );
}

#[tokio::test]
async fn test_blog_post_navigation_encodes_slug() {
    let base = BasePath::new("/OK-DEVS/");
    let router = router_with(site_source(&base, &[]), &base, "/OK-DEVS/", "blog");
    router.handle_route().await;

    router
        .dispatch(NavigationRequest::with_param("blog-post", "building-in-the-open"))
        .await;

    let (entry, url) = router.history().entries().pop().unwrap();
    assert_eq!(url, "/OK-DEVS/#blog-building-in-the-open");
    assert_eq!(entry.blog_slug.as_deref(), Some("building-in-the-open"));
}

#[tokio::test]
async fn test_unknown_blog_slug_redirects() {
    let router = site_router("/", "blog-no-such-post");

    let outcome = router.handle_route().await;

    assert_eq!(outcome, RenderOutcome::Rendered { view: "404".into() });
    assert_eq!(container(&router), "<h1>Page not found</h1>");
    // The redirect is an explicit navigation
    let entries = router.history().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1, "#404");
    assert_eq!(router.current_view(), "404");
}

#[tokio::test]
async fn test_missing_container_skips_load() {
    let base = BasePath::root();
    let router = Router::new(
        settings(&base),
        site_source(&base, &[]),
        MemoryDom::new(),
        MemoryHistory::at("/", "projects"),
    );

    let outcome = router.handle_route().await;

    assert_eq!(outcome, RenderOutcome::Skipped { view: "projects".into() });
    assert!(router.source().requests().is_empty());
    assert_eq!(router.current_view(), "projects");
}

/// Holds selected URLs until their gate is opened
struct GatedSource {
    inner: StaticSource,
    gates: HashMap<String, Rc<Notify>>,
}

#[async_trait(?Send)]
impl FragmentSource for GatedSource {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        if let Some(gate) = self.gates.get(url) {
            gate.notified().await;
        }
        self.inner.fetch(url).await
    }
}

#[tokio::test]
async fn test_superseded_load_never_renders() {
    let base = BasePath::root();
    let gate = Rc::new(Notify::new());
    let source = GatedSource {
        inner: site_source(&base, &[]),
        gates: HashMap::from([("views/projects.html".to_string(), Rc::clone(&gate))]),
    };
    let router = router_with(source, &base, "/", "");

    let slow = router.navigate("projects", None);
    let fast = async {
        let outcome = router.navigate("about", None).await;
        // The overtaken load is still in flight
        assert!(router.dom().has_class(CONTAINER, "loading"));
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow, RenderOutcome::Superseded { view: "projects".into() });
    assert_eq!(fast, RenderOutcome::Rendered { view: "about".into() });
    assert_eq!(container(&router), "<h1>about</h1>");
    assert!(!router.dom().has_element("projectsGrid"));
    assert!(!router.dom().has_class(CONTAINER, "loading"));
    assert_eq!(router.state().loads_in_flight(), 0);
    assert_eq!(router.history().len(), 2);
}

#[tokio::test]
async fn test_superseded_failure_skips_fallback() {
    let base = BasePath::root();
    let gate = Rc::new(Notify::new());
    let source = GatedSource {
        inner: site_source(&base, &["projects"]),
        gates: HashMap::from([("views/projects.html".to_string(), Rc::clone(&gate))]),
    };
    let router = router_with(source, &base, "/", "");

    let slow = router.navigate("projects", None);
    let fast = async {
        let outcome = router.navigate("about", None).await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow, RenderOutcome::Superseded { view: "projects".into() });
    assert_eq!(fast, RenderOutcome::Rendered { view: "about".into() });
    assert_eq!(
        router.source().inner.requests(),
        vec!["views/about.html", "views/projects.html"]
    );
    assert_eq!(container(&router), "<h1>about</h1>");
    assert!(!router.dom().has_class(CONTAINER, "loading"));
}

struct AlwaysRedirect;

#[async_trait(?Send)]
impl ViewInitializer for AlwaysRedirect {
    async fn initialize(&self, _cx: &ViewContext<'_>) -> InitOutcome {
        InitOutcome::Redirect(NavigationRequest::new("contact"))
    }
}

#[tokio::test]
async fn test_redirect_loop_is_bounded() {
    let base = BasePath::root();
    let router = Router::new(
        settings(&base),
        site_source(&base, &[]),
        page_dom(),
        MemoryHistory::at("/", ""),
    )
    .with_initializers(InitializerMap::new().register("contact", AlwaysRedirect));

    let outcome = router.navigate("contact", None).await;

    assert!(matches!(
        outcome,
        RenderOutcome::Failed {
            error: RouterError::RedirectLoop(_),
            ..
        }
    ));
    assert_eq!(router.history().len(), MAX_REDIRECTS + 1);
    assert!(!router.dom().has_class(CONTAINER, "loading"));
}

#[test]
fn test_fragment_urls() {
    let router = site_router("/", "");
    assert_eq!(router.fragment_url(&"blog".into()), "views/blog.html");
    assert_eq!(router.fragment_url(&"missing".into()), "views/404.html");

    let base = BasePath::new("/OK-DEVS/");
    let router = router_with(StaticSource::new(), &base, "/OK-DEVS/", "");
    assert_eq!(router.fragment_url(&"home".into()), "/OK-DEVS/views/home.html");
}
