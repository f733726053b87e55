//! Command palette
//!
//! A keyboard-driven overlay listing the main views. Typing filters the
//! list; arrow keys move a wrapping selection and Enter navigates to it.

use serde::Serialize;

use crate::html::escape_html;
use crate::router::NavigationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Command {
    pub id: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub view: &'static str,
}

const fn command(id: &'static str, title: &'static str, desc: &'static str) -> Command {
    Command {
        id,
        title,
        desc,
        view: id,
    }
}

pub const COMMANDS: &[Command] = &[
    command("home", "Home", "Go to home page"),
    command("projects", "Projects", "View our projects"),
    command("solutions", "Solutions", "View our solutions"),
    command("milestones", "Milestones", "View milestones"),
    command("blog", "Blog", "Read our blog"),
    command("contact", "Contact", "Get in touch"),
    command("feedback", "Feedback", "Send feedback"),
    command("about", "About", "Learn about us"),
    command("legal", "Legal", "Privacy & Terms"),
];

impl Command {
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.desc.to_lowercase().contains(needle)
    }
}

/// A key press as seen by the document-level handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
}

impl<'a> KeyPress<'a> {
    pub fn plain(key: &'a str) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: &'a str) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    fn is_toggle(&self) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case("k")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// Key not handled by the palette
    Ignored,
    Opened,
    Closed,
    /// Selection moved; re-render the results
    Moved,
    Navigate(NavigationRequest),
}

impl PaletteAction {
    /// Whether the browser's default handling of the key should be suppressed
    pub fn consumes_key(&self) -> bool {
        !matches!(self, PaletteAction::Ignored)
    }
}

#[derive(Debug, Clone)]
pub struct CommandPalette {
    commands: &'static [Command],
    open: bool,
    query: String,
    selected: usize,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new(COMMANDS)
    }
}

impl CommandPalette {
    pub fn new(commands: &'static [Command]) -> Self {
        Self {
            commands,
            open: false,
            query: String::new(),
            selected: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
    }

    /// Closing always clears the query and the selection
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
    }

    pub fn toggle(&mut self) -> PaletteAction {
        if self.open {
            self.close();
            PaletteAction::Closed
        } else {
            self.open();
            PaletteAction::Opened
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.selected = 0;
    }

    /// Commands whose title or description contains the query, ignoring case
    pub fn results(&self) -> Vec<&'static Command> {
        let needle = self.query.to_lowercase();
        self.commands
            .iter()
            .filter(|cmd| cmd.matches(&needle))
            .collect()
    }

    pub fn selected_command(&self) -> Option<&'static Command> {
        self.results().get(self.selected).copied()
    }

    /// Move the selection by `delta`, wrapping at both ends
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.results().len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(count as isize) as usize;
    }

    /// Pick a command by its view (a click on a result) and close
    pub fn activate(&mut self, view: &str) -> NavigationRequest {
        self.close();
        NavigationRequest::new(view)
    }

    pub fn handle_key(&mut self, key: KeyPress<'_>) -> PaletteAction {
        if key.is_toggle() {
            return self.toggle();
        }
        if !self.open {
            return PaletteAction::Ignored;
        }

        match key.key {
            "Escape" => {
                self.close();
                PaletteAction::Closed
            }
            "ArrowDown" => {
                self.move_selection(1);
                PaletteAction::Moved
            }
            "ArrowUp" => {
                self.move_selection(-1);
                PaletteAction::Moved
            }
            "Enter" => match self.selected_command() {
                Some(cmd) => PaletteAction::Navigate(self.activate(cmd.view)),
                None => PaletteAction::Ignored,
            },
            _ => PaletteAction::Ignored,
        }
    }

    pub fn render_results(&self) -> String {
        let results = self.results();
        if results.is_empty() {
            return r#"<div class="cmd-result-item"><div class="cmd-result-title">No results found</div></div>"#
                .to_string();
        }

        results
            .iter()
            .enumerate()
            .map(|(index, cmd)| {
                let class = if index == self.selected {
                    "cmd-result-item selected"
                } else {
                    "cmd-result-item"
                };
                format!(
                    r#"<div class="{}" data-view="{}"><div class="cmd-result-title">{}</div><div class="cmd-result-desc">{}</div></div>"#,
                    class,
                    escape_html(cmd.view),
                    escape_html(cmd.title),
                    escape_html(cmd.desc)
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> CommandPalette {
        let mut palette = CommandPalette::default();
        palette.open();
        palette
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut palette = opened();
        assert_eq!(palette.results().len(), 9);

        palette.set_query("BLOG");
        let views: Vec<_> = palette.results().iter().map(|c| c.view).collect();
        assert_eq!(views, vec!["blog"]);

        // Matches on the description too
        palette.set_query("touch");
        assert_eq!(palette.results()[0].view, "contact");

        palette.set_query("privacy");
        assert_eq!(palette.results()[0].view, "legal");
    }

    #[test]
    fn test_selection_wraps() {
        let mut palette = opened();
        palette.handle_key(KeyPress::plain("ArrowUp"));
        assert_eq!(palette.selected(), 8);
        palette.handle_key(KeyPress::plain("ArrowDown"));
        assert_eq!(palette.selected(), 0);

        palette.set_query("view");
        // Projects, Solutions, Milestones
        palette.move_selection(3);
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_empty_results_do_not_move() {
        let mut palette = opened();
        palette.set_query("zzz");
        palette.move_selection(1);
        assert_eq!(palette.selected(), 0);
        assert_eq!(palette.handle_key(KeyPress::plain("Enter")), PaletteAction::Ignored);
        assert!(palette.render_results().contains("No results found"));
    }

    #[test]
    fn test_ctrl_k_toggles() {
        let mut palette = CommandPalette::default();
        assert_eq!(palette.handle_key(KeyPress::plain("ArrowDown")), PaletteAction::Ignored);
        assert_eq!(palette.handle_key(KeyPress::ctrl("k")), PaletteAction::Opened);
        assert!(palette.is_open());

        let cmd_k = KeyPress {
            key: "k",
            ctrl: false,
            meta: true,
        };
        assert_eq!(palette.handle_key(cmd_k), PaletteAction::Closed);
        assert!(!palette.is_open());
    }

    #[test]
    fn test_enter_navigates_and_closes() {
        let mut palette = opened();
        palette.set_query("mile");
        let action = palette.handle_key(KeyPress::plain("Enter"));

        assert_eq!(action, PaletteAction::Navigate(NavigationRequest::new("milestones")));
        assert!(action.consumes_key());
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_escape_resets_state() {
        let mut palette = opened();
        palette.set_query("a");
        palette.move_selection(2);
        assert_eq!(palette.handle_key(KeyPress::plain("Escape")), PaletteAction::Closed);

        palette.open();
        assert_eq!(palette.query(), "");
        assert_eq!(palette.selected(), 0);
    }

    #[test]
    fn test_render_marks_selection() {
        let mut palette = opened();
        palette.move_selection(1);
        let html = palette.render_results();
        assert_eq!(html.matches("cmd-result-item selected").count(), 1);
        assert!(html.contains(r#"<div class="cmd-result-item selected" data-view="projects">"#));
        assert!(html.contains("Privacy &amp; Terms"));
    }
}
