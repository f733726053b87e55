//! Page widgets
//!
//! State and decisions for the shell around the view container. The
//! browser frontend owns the event wiring and calls into these types.

mod palette;
mod search;
mod sidebar;
mod stubs;
mod theme;

pub use palette::{Command, CommandPalette, KeyPress, PaletteAction, COMMANDS};
pub use search::{search_url, SEARCH_PAGE};
pub use sidebar::{CollapseTicket, SidebarState, COLLAPSE_DELAY_MS};
pub use stubs::{
    is_stub_form, ChatState, DEMO_FORM_NOTICE, DEMO_MESSAGE_NOTICE, STUB_FORM_IDS,
};
pub use theme::{MemoryThemeStore, Theme, ThemeController, ThemeParseError, ThemeStore, THEME_KEY};

/// Widest viewport treated as mobile, in CSS pixels
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

pub const LOADER_ID: &str = "loader";
/// Delay between fading the page loader and removing it from layout
pub const LOADER_HIDE_DELAY_MS: u32 = 500;

/// Fraction of the hero video that must be visible for it to play
pub const HERO_VIDEO_THRESHOLD: f64 = 0.5;

pub fn is_mobile(viewport_width: f64) -> bool {
    viewport_width <= MOBILE_BREAKPOINT_PX
}

/// Whether the hero video should play at the given visibility.
///
/// `None` on wide viewports, where the video keeps its autoplay behaviour.
pub fn hero_video_should_play(viewport_width: f64, visible_ratio: f64) -> Option<bool> {
    is_mobile(viewport_width).then_some(visible_ratio >= HERO_VIDEO_THRESHOLD)
}
