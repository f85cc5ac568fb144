//! UI Context
//!
//! Everything the dispatch flow needs from the page: the message list, the
//! send control, and the text field. Built once at startup and passed to the
//! dispatcher and input handler.

use std::cell::{Cell, RefCell};

use crate::message::{ConversationLog, Message, MessageId};

/// Rendering surface for a conversation.
///
/// Methods take `&self`: implementations are handles onto shared,
/// interior-mutable state (reactive signals, or cells in tests).
pub trait ChatUi {
    /// Append a message, scroll it into view, and return its id
    fn add_message(&self, message: Message) -> MessageId;

    /// Detach a message if it is still shown. Idempotent.
    fn remove_message(&self, id: &MessageId);

    /// Enable or disable the send control
    fn set_send_enabled(&self, enabled: bool);

    /// Move keyboard focus back to the text field
    fn focus_input(&self);

    /// Current text field contents
    fn input_value(&self) -> String;

    fn set_input_value(&self, value: &str);
}

/// In-memory UI used by tests and non-DOM embeddings
#[derive(Debug)]
pub struct HeadlessUi {
    log: RefCell<ConversationLog>,
    input: RefCell<String>,
    send_enabled: Cell<bool>,
    focus_count: Cell<usize>,
}

impl Default for HeadlessUi {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self {
            log: RefCell::new(ConversationLog::new()),
            input: RefCell::new(String::new()),
            send_enabled: Cell::new(true),
            focus_count: Cell::new(0),
        }
    }

    /// Snapshot of the conversation
    pub fn log(&self) -> ConversationLog {
        self.log.borrow().clone()
    }

    pub fn send_enabled(&self) -> bool {
        self.send_enabled.get()
    }

    /// How many times focus was returned to the text field
    pub fn focus_count(&self) -> usize {
        self.focus_count.get()
    }
}

impl ChatUi for HeadlessUi {
    fn add_message(&self, message: Message) -> MessageId {
        self.log.borrow_mut().push(message)
    }

    fn remove_message(&self, id: &MessageId) {
        self.log.borrow_mut().remove(id);
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.send_enabled.set(enabled);
    }

    fn focus_input(&self) {
        self.focus_count.set(self.focus_count.get() + 1);
    }

    fn input_value(&self) -> String {
        self.input.borrow().clone()
    }

    fn set_input_value(&self, value: &str) {
        value.clone_into(&mut self.input.borrow_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_is_idempotent() {
        let ui = HeadlessUi::new();
        let id = ui.add_message(Message::placeholder());
        ui.remove_message(&id);
        ui.remove_message(&id);
        ui.remove_message(&MessageId::from_string("never-added"));
        assert!(ui.log().is_empty());
    }

    #[test]
    fn test_input_round_trip() {
        let ui = HeadlessUi::new();
        ui.set_input_value("  hello ");
        assert_eq!(ui.input_value(), "  hello ");
        assert!(ui.send_enabled());
    }
}
