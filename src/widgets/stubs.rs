//! Chat window and contact forms. Neither has a backend; both answer with
//! a demo notice.

pub const DEMO_MESSAGE_NOTICE: &str = "Message sent! (This is a demo - no backend connected)";
pub const DEMO_FORM_NOTICE: &str = "Form submitted! (This is a demo - no backend connected)";

/// Forms whose submits are intercepted
pub const STUB_FORM_IDS: &[&str] = &["contactForm", "feedbackForm"];

pub fn is_stub_form(id: &str) -> bool {
    STUB_FORM_IDS.contains(&id)
}

#[derive(Debug, Default)]
pub struct ChatState {
    open: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Notice to show for a sent message; blank messages are ignored
    pub fn send(&self, message: &str) -> Option<&'static str> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        tracing::info!("Chat message (not delivered): {}", message);
        Some(DEMO_MESSAGE_NOTICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_toggle_and_close() {
        let mut chat = ChatState::new();
        assert!(chat.toggle());
        assert!(!chat.toggle());
        chat.toggle();
        chat.close();
        assert!(!chat.is_open());
    }

    #[test]
    fn test_chat_send() {
        let chat = ChatState::new();
        assert_eq!(chat.send("   "), None);
        assert_eq!(chat.send("hello"), Some(DEMO_MESSAGE_NOTICE));
    }

    #[test]
    fn test_stub_forms() {
        assert!(is_stub_form("contactForm"));
        assert!(is_stub_form("feedbackForm"));
        assert!(!is_stub_form("searchForm"));
    }
}
