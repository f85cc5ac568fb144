//! Conversation Messages
//!
//! The entries shown in the widget and the append-only log that holds them.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text shown by the transient bot entry while a request is pending
pub const PLACEHOLDER_TEXT: &str = "Thinking";

/// Who a message is attributed to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Text typed by the visitor
    User,
    /// Reply, error or placeholder from the assistant
    Bot,
}

impl Sender {
    /// Style class attached to the message element
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Bot => write!(f, "bot"),
        }
    }
}

/// Opaque message identifier, also used as the element id in the DOM
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

impl MessageId {
    /// Time-derived identifier; the sequence suffix keeps ids distinct
    /// within the same millisecond.
    pub fn generate() -> Self {
        let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        Self(format!("msg-{}-{}", Utc::now().timestamp_millis(), seq))
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in the conversation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    /// Transient "Thinking" entry, removed once the outcome is known
    #[serde(default)]
    pub is_placeholder: bool,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message with a fresh identifier
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            sender,
            text: text.into(),
            is_placeholder: false,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    /// Bot-styled "Thinking" entry
    pub fn placeholder() -> Self {
        let mut msg = Self::bot(PLACEHOLDER_TEXT);
        msg.is_placeholder = true;
        msg
    }

    /// Full class list for the message element
    pub fn css_classes(&self) -> String {
        let mut classes = format!("message {}", self.sender.css_class());
        if self.is_placeholder {
            classes.push_str(" loading");
        }
        classes
    }
}

/// Ordered, session-lived conversation. Insertion order is display order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its identifier
    pub fn push(&mut self, message: Message) -> MessageId {
        let id = message.id.clone();
        self.messages.push(message);
        id
    }

    /// Detach a message by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: &MessageId) -> Option<Message> {
        let pos = self.messages.iter().position(|m| &m.id == id)?;
        Some(self.messages.remove(pos))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of pending "Thinking" entries
    pub fn placeholder_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_placeholder).count()
    }

    /// Messages from a given sender, placeholders excluded
    pub fn count_from(&self, sender: Sender) -> usize {
        self.messages
            .iter()
            .filter(|m| m.sender == sender && !m.is_placeholder)
            .count()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = MessageId::generate();
        let b = MessageId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("msg-"));
    }

    #[test]
    fn test_placeholder_classes() {
        let msg = Message::placeholder();
        assert_eq!(msg.text, PLACEHOLDER_TEXT);
        assert_eq!(msg.css_classes(), "message bot-message loading");
        assert_eq!(Message::user("hi").css_classes(), "message user-message");
    }

    #[test]
    fn test_log_order_and_removal() {
        let mut log = ConversationLog::new();
        log.push(Message::user("Hi"));
        let pending = log.push(Message::placeholder());
        log.push(Message::bot("Hello!"));

        assert_eq!(log.placeholder_count(), 1);
        assert!(log.remove(&pending).is_some());
        assert!(log.remove(&pending).is_none());
        assert!(log.remove(&MessageId::from_string("missing")).is_none());

        let texts: Vec<_> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["Hi", "Hello!"]);
        assert_eq!(log.placeholder_count(), 0);
    }
}
