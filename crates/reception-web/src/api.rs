//! API Client
//!
//! Browser bindings for the core dispatcher: page-origin endpoint resolution,
//! a `setTimeout`-backed timer, and console diagnostics.

use std::sync::Arc;
use std::time::Duration;

use futures::{channel::oneshot, future::LocalBoxFuture};
use leptos::prelude::set_timeout;
use reception_core::{DispatchOutcome, Dispatcher, HttpTransport, Timer, WidgetConfig};

/// Dispatcher used by the widget
pub type WidgetDispatcher = Dispatcher<HttpTransport, BrowserTimer>;

/// Timer driven by the browser's `setTimeout`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel::<()>();
        set_timeout(
            move || {
                let _ = tx.send(());
            },
            duration,
        );
        Box::pin(async move {
            let _ = rx.await;
        })
    }
}

/// Origin the widget was served from
fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:8000".into())
}

/// Build the dispatcher for the current page
pub fn dispatcher(config: &WidgetConfig) -> reception_core::Result<WidgetDispatcher> {
    let transport = config
        .transport(&page_origin())?
        .observe_bodies(Arc::new(log_raw_body));
    Ok(config.dispatcher(transport, BrowserTimer))
}

fn log_raw_body(body: &str) {
    leptos::logging::log!("Raw response: {body}");
}

/// Mirror the outcome of a dispatch flow to the developer console
pub fn log_outcome(outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Failed(err) => leptos::logging::error!("Error: {err:?}"),
        other => leptos::logging::log!("Response: {other:?}"),
    }
}
