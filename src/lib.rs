//! # OK Devs
//!
//! Site shell for the OK Devs portfolio: a hash-based view router that
//! swaps HTML fragments into a single page, plus the view initializers and
//! widgets around it.
//!
//! ## Features
//!
//! - **Address resolution**: hash, `blog-<slug>` and path forms, with an
//!   auto-detected deployment base path
//! - **Fragment loading**: single `404` fallback, asset rewriting, last
//!   navigation wins
//! - **History**: explicit navigations push, back/forward re-resolves
//! - **Host seams**: the same router runs in the browser (WASM) and natively
//!
//! ## Modules
//!
//! - [`router`]: resolution, loading and router state
//! - [`host`]: the DOM, history and fragment source seams
//! - [`views`]: per-view initializers
//! - [`widgets`]: theme, command palette, sidebar and other page widgets
//! - [`data`]: static site data
//! - [`config`]: TOML configuration
//! - `server`: local preview server (`native` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use okdevs::host::{MemoryDom, MemoryHistory, StaticSource};
//! use okdevs::router::{PageLayout, Router, RouterSettings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = StaticSource::new().with_fragment("views/about.html", "<h1>About</h1>");
//!     let dom = MemoryDom::for_layout(&PageLayout::default());
//!     let history = MemoryHistory::at("/", "");
//!
//!     let router = Router::new(RouterSettings::default(), source, dom, history);
//!     let outcome = router.navigate("about", None).await;
//!
//!     println!("{:?}", outcome);
//! }
//! ```

pub mod config;
pub mod data;
pub mod host;
pub mod html;
pub mod router;
#[cfg(feature = "native")]
pub mod server;
pub mod views;
pub mod widgets;

// Re-export top-level types for convenience
pub use router::{
    BasePath, FetchError, Location, NavigationRequest, PageLayout, RenderOutcome, Router,
    RouterError, RouterSettings, ViewId, ViewRegistry,
};

pub use host::{Dom, FragmentSource, History, HistoryEntry};

pub use views::{InitOutcome, InitializerMap, ViewContext, ViewInitializer};

pub use config::{Config, ConfigError};

#[cfg(feature = "native")]
pub use server::{PreviewConfig, ServeError};
