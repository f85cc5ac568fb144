//! Reactive UI Context
//!
//! `ChatUi` implemented over Leptos signals and node refs. Every field is a
//! `Copy` handle, so the context is passed by value into closures and tasks.

use leptos::html::{Div, Textarea};
use leptos::prelude::*;
use reception_core::{ChatUi, ConversationLog, Message, MessageId};

#[derive(Clone, Copy)]
pub struct LeptosUi {
    pub log: RwSignal<ConversationLog>,
    pub input: RwSignal<String>,
    pub send_enabled: RwSignal<bool>,
    pub input_ref: NodeRef<Textarea>,
    pub list_ref: NodeRef<Div>,
}

impl Default for LeptosUi {
    fn default() -> Self {
        Self::new()
    }
}

impl LeptosUi {
    pub fn new() -> Self {
        Self {
            log: RwSignal::new(ConversationLog::new()),
            input: RwSignal::new(String::new()),
            send_enabled: RwSignal::new(true),
            input_ref: NodeRef::new(),
            list_ref: NodeRef::new(),
        }
    }

    /// Scroll once the new entry has been laid out
    fn scroll_to_latest(self) {
        let list_ref = self.list_ref;
        request_animation_frame(move || {
            if let Some(list) = list_ref.get_untracked() {
                list.set_scroll_top(list.scroll_height());
            }
        });
    }
}

impl ChatUi for LeptosUi {
    fn add_message(&self, message: Message) -> MessageId {
        let id = message.id.clone();
        self.log.update(|log| {
            log.push(message);
        });
        self.scroll_to_latest();
        id
    }

    fn remove_message(&self, id: &MessageId) {
        self.log.update(|log| {
            log.remove(id);
        });
    }

    fn set_send_enabled(&self, enabled: bool) {
        self.send_enabled.set(enabled);
    }

    fn focus_input(&self) {
        if let Some(input) = self.input_ref.get_untracked() {
            let _ = input.focus();
        }
    }

    fn input_value(&self) -> String {
        self.input.get_untracked()
    }

    fn set_input_value(&self, value: &str) {
        self.input.set(value.to_owned());
    }
}
