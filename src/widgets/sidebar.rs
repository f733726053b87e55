//! Hover-expanding sidebar

use super::is_mobile;

/// Delay between the pointer leaving and the sidebar collapsing
pub const COLLAPSE_DELAY_MS: u32 = 300;

/// Identifies one scheduled collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseTicket(u64);

/// Expanded state plus a generation counter that invalidates pending
/// collapses whenever the pointer comes back.
#[derive(Debug, Default)]
pub struct SidebarState {
    expanded: bool,
    generation: u64,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn pointer_enter(&mut self) {
        self.generation += 1;
        self.expanded = true;
    }

    /// Schedule a collapse; the caller fires [`Self::collapse_due`] after
    /// [`COLLAPSE_DELAY_MS`]
    pub fn pointer_leave(&mut self) -> CollapseTicket {
        self.generation += 1;
        CollapseTicket(self.generation)
    }

    /// Collapse unless the ticket went stale. Returns whether it collapsed.
    pub fn collapse_due(&mut self, ticket: CollapseTicket) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.expanded = false;
        true
    }

    /// Nav clicks collapse immediately on narrow viewports
    pub fn nav_clicked(&mut self, viewport_width: f64) -> bool {
        if !is_mobile(viewport_width) {
            return false;
        }
        self.generation += 1;
        self.expanded = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_after_leave() {
        let mut sidebar = SidebarState::new();
        sidebar.pointer_enter();
        assert!(sidebar.is_expanded());

        let ticket = sidebar.pointer_leave();
        assert!(sidebar.is_expanded());
        assert!(sidebar.collapse_due(ticket));
        assert!(!sidebar.is_expanded());
    }

    #[test]
    fn test_reenter_cancels_collapse() {
        let mut sidebar = SidebarState::new();
        sidebar.pointer_enter();
        let ticket = sidebar.pointer_leave();
        sidebar.pointer_enter();

        assert!(!sidebar.collapse_due(ticket));
        assert!(sidebar.is_expanded());
    }

    #[test]
    fn test_nav_click_by_viewport() {
        let mut sidebar = SidebarState::new();
        sidebar.pointer_enter();
        assert!(!sidebar.nav_clicked(1024.0));
        assert!(sidebar.is_expanded());
        assert!(sidebar.nav_clicked(768.0));
        assert!(!sidebar.is_expanded());
    }
}
