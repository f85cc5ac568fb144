//! UI Components

use leptos::prelude::*;
use reception_core::{FormatPolicy, Message, format::format_with};

/// Message bubble component
#[component]
pub fn MessageBubble(message: Message, policy: FormatPolicy) -> impl IntoView {
    let html = format_with(&message.text, policy);

    view! {
        <div id=message.id.to_string() class=message.css_classes()>
            <div class="message-content" inner_html=html></div>
        </div>
    }
}

/// One-click canned questions
#[component]
pub fn QuickQuestions(questions: Vec<String>, on_ask: Callback<String>) -> impl IntoView {
    view! {
        <div class="quick-questions">
            {questions
                .into_iter()
                .map(|question| {
                    let label = question.clone();
                    view! {
                        <button class="quick-question" on:click=move |_| on_ask.run(question.clone())>
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
