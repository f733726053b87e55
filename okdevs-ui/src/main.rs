//! OK Devs Frontend
//!
//! Browser entry point for the OK Devs site shell, compiled to WebAssembly.
//!
//! # Architecture
//!
//! The page is a static `index.html` with an `#app-content` container. The
//! `okdevs` router core decides which view fragment goes there; this crate
//! supplies the browser implementations of its host seams (`web-sys` DOM,
//! History API, `gloo-net` fetches) and wires the page widgets to DOM
//! events.

mod app;
mod hosts;
mod widgets;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    app::start();
}
