//! Chat Page

use leptos::prelude::*;
use reception_core::{CancellationToken, WidgetConfig, input};

use crate::api::{self, WidgetDispatcher};
use crate::components::{MessageBubble, QuickQuestions};
use crate::ui::LeptosUi;

#[component]
pub fn ChatPage(config: WidgetConfig, dispatcher: WidgetDispatcher) -> impl IntoView {
    let ui = LeptosUi::new();
    let policy = config.format;
    let dispatcher = StoredValue::new_local(dispatcher);

    // In-flight requests are abandoned when the widget unmounts
    let token = CancellationToken::new();
    let shutdown = token.clone();
    on_cleanup(move || shutdown.cancel());
    let cancel = StoredValue::new(token);

    let dispatch = move |question: Option<String>| {
        let dispatcher = dispatcher.get_value();
        let cancel = cancel.get_value();
        leptos::task::spawn_local(async move {
            let outcome = match question {
                Some(question) => input::ask_question(&ui, &dispatcher, &cancel, &question).await,
                None => input::submit(&ui, &dispatcher, &cancel).await,
            };
            if let Some(outcome) = outcome {
                api::log_outcome(&outcome);
            }
        });
    };

    // Quick questions bypass this check
    let send = move || {
        if ui.send_enabled.get_untracked() {
            dispatch(None);
        }
    };

    view! {
        <div class="chat-container">
            <header class="chat-header">
                <h2>"Hospital Reception Assistant"</h2>
            </header>

            <div id="chat-messages" class="chat-messages" node_ref=ui.list_ref>
                <For
                    each=move || ui.log.with(|log| log.messages().to_vec())
                    key=|msg| msg.id.clone()
                    children=move |msg| view! { <MessageBubble message=msg policy=policy /> }
                />
            </div>

            <QuickQuestions
                questions=config.quick_questions
                on_ask=Callback::new(move |question: String| dispatch(Some(question)))
            />

            <div class="chat-input">
                <textarea
                    id="user-input"
                    rows="1"
                    placeholder="Ask about hospitals, departments, doctors..."
                    node_ref=ui.input_ref
                    prop:value=move || ui.input.get()
                    on:input=move |ev| ui.input.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            send();
                        }
                    }
                />
                <button id="send-button" on:click=move |_| send() disabled=move || !ui.send_enabled.get()>
                    "Send"
                </button>
            </div>
        </div>
    }
}
