//! Widget Wiring
//!
//! Connects the page's widgets to DOM events. Every widget is optional:
//! when its elements are missing from the page it is simply not installed.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlVideoElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    MouseEvent, Window,
};

use okdevs::router::NavigationRequest;
use okdevs::views::{timeline_progress, TIMELINE_LINE_ID};
use okdevs::widgets::{
    hero_video_should_play, is_stub_form, search_url, ChatState, CommandPalette, KeyPress,
    PaletteAction, SidebarState, Theme, ThemeController, COLLAPSE_DELAY_MS, DEMO_FORM_NOTICE,
    HERO_VIDEO_THRESHOLD, LOADER_HIDE_DELAY_MS, LOADER_ID,
};

use crate::app::{closest, listen, navigate, SiteRouter};
use crate::hosts::LocalThemeStore;

pub fn install(window: &Window, document: &Document, router: &Rc<SiteRouter>) {
    install_theme(document);
    install_sidebar(window, document);
    install_palette(document, router);
    install_chat(window, document);
    install_forms(window, document);
    install_search(window, document);
    install_lets_talk(document, router);
    install_loader(window, document);
    install_timeline_progress(window, document);
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or_default()
}

fn alert(window: &Window, message: &str) {
    let _ = window.alert_with_message(message);
}

// ============ Theme ============

fn apply_theme(document: &Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
    if let Some(toggle) = document.get_element_by_id("themeToggle") {
        toggle.set_text_content(Some(theme.icon()));
    }
}

fn install_theme(document: &Document) {
    let controller = ThemeController::new(LocalThemeStore);
    apply_theme(document, controller.current());

    let Some(toggle) = document.get_element_by_id("themeToggle") else {
        return;
    };
    let document = document.clone();
    listen(&toggle, "click", move |_: MouseEvent| {
        apply_theme(&document, controller.toggle());
    });
}

// ============ Sidebar ============

fn install_sidebar(window: &Window, document: &Document) {
    let Some(sidebar) = document.get_element_by_id("sidebar") else {
        return;
    };
    let state = Rc::new(RefCell::new(SidebarState::new()));

    let (enter_state, enter_el) = (Rc::clone(&state), sidebar.clone());
    listen(&sidebar, "mouseenter", move |_: MouseEvent| {
        enter_state.borrow_mut().pointer_enter();
        let _ = enter_el.class_list().add_1("expanded");
    });

    let (leave_state, leave_el) = (Rc::clone(&state), sidebar.clone());
    listen(&sidebar, "mouseleave", move |_: MouseEvent| {
        let ticket = leave_state.borrow_mut().pointer_leave();
        let (state, el) = (Rc::clone(&leave_state), leave_el.clone());
        Timeout::new(COLLAPSE_DELAY_MS, move || {
            if state.borrow_mut().collapse_due(ticket) {
                let _ = el.class_list().remove_1("expanded");
            }
        })
        .forget();
    });

    let (window, el) = (window.clone(), sidebar.clone());
    listen(&sidebar, "click", move |event: MouseEvent| {
        if closest(&event, ".nav-item").is_none() {
            return;
        }
        if state.borrow_mut().nav_clicked(viewport_width(&window)) {
            let _ = el.class_list().remove_1("expanded");
        }
    });
}

// ============ Command palette ============

struct PaletteView {
    root: Element,
    input: Option<HtmlInputElement>,
    results: Option<Element>,
}

impl PaletteView {
    fn sync(&self, palette: &CommandPalette) {
        let _ = self
            .root
            .class_list()
            .toggle_with_force("active", palette.is_open());

        if let Some(results) = &self.results {
            results.set_inner_html(&palette.render_results());
        }

        if let Some(input) = &self.input {
            input.set_value(palette.query());
        }
    }

    fn focus_input(&self) {
        if let Some(input) = self.input.clone() {
            Timeout::new(100, move || {
                let _ = input.focus();
            })
            .forget();
        }
    }
}

fn install_palette(document: &Document, router: &Rc<SiteRouter>) {
    let Some(root) = document.get_element_by_id("cmdPalette") else {
        return;
    };
    let view = Rc::new(PaletteView {
        root: root.clone(),
        input: document
            .get_element_by_id("cmdInput")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok()),
        results: document.get_element_by_id("cmdResults"),
    });
    let palette = Rc::new(RefCell::new(CommandPalette::default()));

    // Buttons that open the palette
    for id in ["cmdPaletteBtn", "cmdPalette404"] {
        if let Some(button) = document.get_element_by_id(id) {
            let (palette, view) = (Rc::clone(&palette), Rc::clone(&view));
            listen(&button, "click", move |_: MouseEvent| {
                palette.borrow_mut().open();
                view.sync(&palette.borrow());
                view.focus_input();
            });
        }
    }

    let (key_palette, key_view, key_router) =
        (Rc::clone(&palette), Rc::clone(&view), Rc::clone(router));
    listen(document, "keydown", move |event: KeyboardEvent| {
        let key = event.key();
        let action = key_palette.borrow_mut().handle_key(KeyPress {
            key: &key,
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
        });
        if action.consumes_key() {
            event.prevent_default();
        }

        match action {
            PaletteAction::Ignored => return,
            PaletteAction::Navigate(request) => navigate(&key_router, request),
            PaletteAction::Opened => key_view.focus_input(),
            PaletteAction::Closed | PaletteAction::Moved => {}
        }
        key_view.sync(&key_palette.borrow());
    });

    if let Some(input) = view.input.clone() {
        let (input_palette, input_view) = (Rc::clone(&palette), Rc::clone(&view));
        let source = input.clone();
        listen(&input, "input", move |_: Event| {
            input_palette.borrow_mut().set_query(&source.value());
            if let Some(results) = &input_view.results {
                results.set_inner_html(&input_palette.borrow().render_results());
            }
        });
    }

    // Result items carry data-view, so the document handler navigates;
    // here the palette only closes
    if let Some(results) = view.results.clone() {
        let (click_palette, click_view) = (Rc::clone(&palette), Rc::clone(&view));
        listen(&results, "click", move |event: MouseEvent| {
            if closest(&event, "[data-view]").is_some() {
                click_palette.borrow_mut().close();
                click_view.sync(&click_palette.borrow());
            }
        });
    }

    if let Ok(Some(overlay)) = root.query_selector(".cmd-palette-overlay") {
        listen(&overlay, "click", move |_: MouseEvent| {
            palette.borrow_mut().close();
            view.sync(&palette.borrow());
        });
    }
}

// ============ Chat and forms ============

fn install_chat(window: &Window, document: &Document) {
    let Some(chat_window) = document.get_element_by_id("chatWindow") else {
        return;
    };
    let chat = Rc::new(RefCell::new(ChatState::new()));
    let show = {
        let chat_window = chat_window.clone();
        move |open: bool| {
            let _ = chat_window.class_list().toggle_with_force("open", open);
        }
    };

    if let Some(button) = document.get_element_by_id("chatBtn") {
        let (chat, show) = (Rc::clone(&chat), show.clone());
        listen(&button, "click", move |_: MouseEvent| {
            let open = chat.borrow_mut().toggle();
            show(open);
        });
    }

    if let Ok(Some(close)) = chat_window.query_selector(".chat-close") {
        let (chat, show) = (Rc::clone(&chat), show.clone());
        listen(&close, "click", move |_: MouseEvent| {
            chat.borrow_mut().close();
            show(false);
        });
    }

    if let Ok(Some(send)) = document.query_selector(".chat-send") {
        let message = document
            .get_element_by_id("chatMessage")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let (chat, window) = (Rc::clone(&chat), window.clone());
        listen(&send, "click", move |event: MouseEvent| {
            event.prevent_default();
            let Some(input) = &message else {
                return;
            };
            if let Some(notice) = chat.borrow().send(&input.value()) {
                input.set_value("");
                alert(&window, notice);
            }
        });
    }

    listen(document, "keydown", move |event: KeyboardEvent| {
        if event.key() == "Escape" && chat.borrow().is_open() {
            chat.borrow_mut().close();
            show(false);
        }
    });
}

fn install_forms(window: &Window, document: &Document) {
    let window = window.clone();
    listen(document, "submit", move |event: Event| {
        let Some(form) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };
        if is_stub_form(&form.id()) {
            event.prevent_default();
            alert(&window, DEMO_FORM_NOTICE);
            form.reset();
        }
    });
}

fn install_search(window: &Window, document: &Document) {
    let Some(input) = document
        .get_element_by_id("searchInput")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let (window, source) = (window.clone(), input.clone());
    listen(&input, "keydown", move |event: KeyboardEvent| {
        if event.key() != "Enter" {
            return;
        }
        if let Some(url) = search_url(&source.value()) {
            let _ = window.location().set_href(&url);
        }
    });
}

fn install_lets_talk(document: &Document, router: &Rc<SiteRouter>) {
    let Some(button) = document.get_element_by_id("letsTalkBtn") else {
        return;
    };
    let router = Rc::clone(router);
    listen(&button, "click", move |_: MouseEvent| {
        navigate(&router, NavigationRequest::new("contact"));
    });
}

// ============ Loader, timeline, hero video ============

fn install_loader(window: &Window, document: &Document) {
    let Some(loader) = document.get_element_by_id(LOADER_ID) else {
        return;
    };
    let hide = move || {
        let _ = loader.class_list().add_1("hidden");
        let loader = loader.clone();
        Timeout::new(LOADER_HIDE_DELAY_MS, move || {
            if let Some(el) = loader.dyn_ref::<HtmlElement>() {
                let _ = el.style().set_property("display", "none");
            }
        })
        .forget();
    };

    if document.ready_state() == "complete" {
        hide();
    } else {
        listen(window, "load", move |_: Event| hide());
    }
}

fn install_timeline_progress(window: &Window, document: &Document) {
    let (scroll_window, document) = (window.clone(), document.clone());
    listen(window, "scroll", move |_: Event| {
        sync_timeline_progress(&scroll_window, &document);
    });
}

/// Size the milestone progress bar for the current scroll position
pub fn update_timeline_progress() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(document) = window.document() {
        sync_timeline_progress(&window, &document);
    }
}

fn sync_timeline_progress(window: &Window, document: &Document) {
    let Some(line) = document.get_element_by_id(TIMELINE_LINE_ID) else {
        return;
    };
    let bar = match line.query_selector(".timeline-progress") {
        Ok(Some(bar)) => bar,
        _ => {
            let Ok(bar) = document.create_element("div") else {
                return;
            };
            bar.set_class_name("timeline-progress");
            let _ = line.append_child(&bar);
            bar
        }
    };

    let scroll_top = window.scroll_y().unwrap_or_default();
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or_default();
    let scroll_height = document
        .document_element()
        .map(|root| root.scroll_height() as f64)
        .unwrap_or_default();

    let progress = timeline_progress(scroll_top, scroll_height, viewport);
    if let Some(bar) = bar.dyn_ref::<HtmlElement>() {
        let _ = bar.style().set_property("height", &format!("{}%", progress));
    }
}

/// Play the hero video inline on narrow viewports only while it is visible
pub fn optimize_hero_video() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(video) = window
        .document()
        .and_then(|d| d.query_selector(".hero-video").ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
    else {
        return;
    };

    let width = viewport_width(&window);
    if hero_video_should_play(width, 1.0).is_none() {
        return;
    }

    let _ = video.set_attribute("playsinline", "true");
    let _ = video.set_attribute("webkit-playsinline", "true");
    let style = video.style();
    let _ = style.set_property("width", "100%");
    let _ = style.set_property("height", "100%");
    let _ = style.set_property("object-fit", "cover");

    let target = video.clone();
    let on_visibility = Closure::wrap(Box::new(move |entries: js_sys::Array, _: JsValue| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            match hero_video_should_play(width, entry.intersection_ratio()) {
                Some(true) => {
                    // Autoplay may be refused; nothing to do about it
                    if let Ok(promise) = target.play() {
                        spawn_local(async move {
                            let _ = JsFuture::from(promise).await;
                        });
                    }
                }
                Some(false) => {
                    let _ = target.pause();
                }
                None => {}
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, JsValue)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(HERO_VIDEO_THRESHOLD));
    match IntersectionObserver::new_with_options(on_visibility.as_ref().unchecked_ref(), &options)
    {
        Ok(observer) => observer.observe(&video),
        Err(e) => {
            web_sys::console::error_1(&format!("IntersectionObserver failed: {:?}", e).into())
        }
    }
    on_visibility.forget();
}
