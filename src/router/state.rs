//! Router state
//!
//! Owned by a single router on the UI thread, so plain `Cell`/`RefCell`
//! suffice. Besides the current view it tracks a load generation, used to
//! drop fetches that a newer navigation has overtaken, and the number of
//! loads in flight, used to decide when the loading indicator goes away.

use std::cell::{Cell, RefCell};

use super::resolve::BasePath;
use super::view::ViewId;

/// Phase of the most recent load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    /// Retrying with the `404` fragment after a failed fetch
    LoadingFallback,
    /// Markup injected, initializer running
    Rendered,
}

/// Ticket identifying one load; only the newest ticket may touch the DOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct RouterState {
    base_path: BasePath,
    current_view: RefCell<ViewId>,
    current_param: RefCell<Option<String>>,
    generation: Cell<u64>,
    in_flight: Cell<usize>,
    phase: Cell<LoadPhase>,
}

impl RouterState {
    pub fn new(base_path: BasePath) -> Self {
        Self {
            base_path,
            current_view: RefCell::new(ViewId::home()),
            current_param: RefCell::new(None),
            generation: Cell::new(0),
            in_flight: Cell::new(0),
            phase: Cell::new(LoadPhase::Idle),
        }
    }

    pub fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    pub fn current_view(&self) -> ViewId {
        self.current_view.borrow().clone()
    }

    pub fn current_param(&self) -> Option<String> {
        self.current_param.borrow().clone()
    }

    pub fn commit(&self, view: ViewId, param: Option<String>) {
        *self.current_view.borrow_mut() = view;
        *self.current_param.borrow_mut() = param;
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase.get()
    }

    pub(crate) fn set_phase(&self, phase: LoadPhase) {
        self.phase.set(phase);
    }

    /// Start a load, superseding every earlier ticket
    pub fn begin_load(&self) -> LoadTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        self.phase.set(LoadPhase::Loading);
        LoadTicket(next)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.get() == ticket.0
    }

    pub fn loads_in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// Returns true when this is the first load in flight
    pub(crate) fn enter_load(&self) -> bool {
        let count = self.in_flight.get() + 1;
        self.in_flight.set(count);
        count == 1
    }

    /// Returns true when no load remains in flight
    pub(crate) fn exit_load(&self) -> bool {
        let count = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(count);
        if count == 0 {
            self.phase.set(LoadPhase::Idle);
        }
        count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = RouterState::new(BasePath::root());
        assert_eq!(state.current_view(), "home");
        assert_eq!(state.current_param(), None);
        assert_eq!(state.phase(), LoadPhase::Idle);
        assert_eq!(state.loads_in_flight(), 0);
    }

    #[test]
    fn test_newer_ticket_supersedes() {
        let state = RouterState::new(BasePath::root());
        let first = state.begin_load();
        assert!(state.is_current(first));

        let second = state.begin_load();
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_in_flight_counting() {
        let state = RouterState::new(BasePath::root());
        assert!(state.enter_load());
        assert!(!state.enter_load());
        assert!(!state.exit_load());
        assert!(state.exit_load());
        assert!(state.exit_load());
        assert_eq!(state.loads_in_flight(), 0);
    }

    #[test]
    fn test_commit() {
        let state = RouterState::new(BasePath::new("/OK-DEVS"));
        state.commit(ViewId::blog_post(), Some("slug".to_string()));
        assert_eq!(state.current_view(), "blog-post");
        assert_eq!(state.current_param().as_deref(), Some("slug"));
        assert_eq!(state.base_path().as_str(), "/OK-DEVS/");
    }
}
