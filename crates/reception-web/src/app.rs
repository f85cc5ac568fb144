//! Main App Component

use leptos::prelude::*;
use reception_core::WidgetConfig;

use crate::api;
use crate::pages::ChatPage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let config = WidgetConfig::default();

    match api::dispatcher(&config) {
        Ok(dispatcher) => view! {
            <main class="app">
                <ChatPage config=config dispatcher=dispatcher />
            </main>
        }
        .into_any(),
        Err(err) => {
            leptos::logging::error!("Widget configuration rejected: {err}");
            view! {
                <main class="app">
                    <p class="error">{err.to_string()}</p>
                </main>
            }
            .into_any()
        }
    }
}
