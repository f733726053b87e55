//! App Boot
//!
//! Builds the router for the current page, installs the document-level
//! listeners and runs the initial route.

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{console, Element, Event, EventTarget, MouseEvent};

use okdevs::config::Config;
use okdevs::data::SiteData;
use okdevs::router::{NavigationRequest, RenderOutcome, Router};
use okdevs::views::InitializerMap;

use crate::hosts::{BrowserDom, BrowserHistory, GlooSource};
use crate::widgets;

pub type SiteRouter = Router<GlooSource, BrowserDom, BrowserHistory>;

/// Boot the site shell
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let pathname = window.location().pathname().unwrap_or_default();
    let settings = match Config::default().router_settings(&pathname) {
        Ok(settings) => settings,
        Err(e) => {
            console::error_1(&format!("Router configuration invalid: {}", e).into());
            return;
        }
    };

    let router = Rc::new(
        Router::new(
            settings,
            GlooSource,
            BrowserDom::new(window.clone(), document.clone()),
            BrowserHistory::new(window.clone()),
        )
        .with_initializers(InitializerMap::site_default(SiteData::site())),
    );

    // Clicks on any [data-view] trigger, including ones injected later
    let click_router = Rc::clone(&router);
    listen(&document, "click", move |event: MouseEvent| {
        let Some(trigger) = closest(&event, "[data-view]") else {
            return;
        };
        event.prevent_default();
        let view = trigger.get_attribute("data-view").unwrap_or_default();
        let slug = trigger.get_attribute("data-blog-slug");
        navigate(&click_router, NavigationRequest::from_trigger(&view, slug.as_deref()));
    });

    // Back/forward re-resolves the address
    let pop_router = Rc::clone(&router);
    listen(&window, "popstate", move |_: Event| {
        route(&pop_router);
    });

    widgets::install(&window, &document, &router);

    route(&router);
}

/// Explicit navigation, pushing history
pub fn navigate(router: &Rc<SiteRouter>, request: NavigationRequest) {
    let router = Rc::clone(router);
    spawn_local(async move {
        let outcome = router.dispatch(request).await;
        after_render(&outcome);
    });
}

/// Passive navigation from the current address
fn route(router: &Rc<SiteRouter>) {
    let router = Rc::clone(router);
    spawn_local(async move {
        let outcome = router.handle_route().await;
        after_render(&outcome);
    });
}

fn after_render(outcome: &RenderOutcome) {
    match outcome {
        RenderOutcome::Rendered { view } => {
            if view.is_home() {
                widgets::optimize_hero_video();
            } else if view.as_str() == "milestones" {
                widgets::update_timeline_progress();
            }
        }
        RenderOutcome::FellBack { requested, error } => {
            console::warn_1(&format!("Error loading view {}: {}", requested, error).into());
        }
        RenderOutcome::Failed { view, error } => {
            console::error_1(&format!("Error loading view {}: {}", view, error).into());
        }
        RenderOutcome::Superseded { .. } | RenderOutcome::Skipped { .. } => {}
    }
}

/// Attach a listener for the page's lifetime
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F)
where
    E: JsCast,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: Event| {
        handler(event.unchecked_into::<E>());
    }) as Box<dyn FnMut(Event)>);

    if let Err(e) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        console::error_1(&format!("Failed to listen for {}: {:?}", event, e).into());
    }
    closure.forget();
}

/// Nearest ancestor of the event target matching `selector`
pub fn closest<E: AsRef<Event>>(event: &E, selector: &str) -> Option<Element> {
    event
        .as_ref()
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}
