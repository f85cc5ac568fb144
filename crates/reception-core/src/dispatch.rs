//! Message Dispatcher
//!
//! The dispatch flow for one submission:
//!
//! 1. show the user's message
//! 2. acquire the pending state (send disabled, "Thinking" placeholder shown)
//! 3. exchange one request with the backend, bounded by timeout/cancellation
//! 4. render the reply, the fallback, or the error as a bot message
//! 5. release the pending state (placeholder removed, send re-enabled, focus restored)
//!
//! Step 5 lives in `PendingRequest::drop`, so it runs exactly once on every
//! exit path, including the dispatch future being dropped mid-flight.

use std::time::Duration;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::error::{ReceptionError, Result};
use crate::message::{Message, MessageId};
use crate::timer::Timer;
use crate::transport::ReceptionTransport;
use crate::view::ChatUi;
use crate::wire::{AskRequest, AskResponse, NO_RESPONSE_TEXT};

/// How a dispatch flow ended
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Backend answered with reply text
    Replied(String),
    /// Backend answered without a usable `response` field
    NoResponse,
    /// Transport, status, parse, timeout or cancellation failure
    Failed(ReceptionError),
}

impl DispatchOutcome {
    /// Text of the bot message rendered for this outcome
    pub fn display_text(&self) -> String {
        match self {
            Self::Replied(text) => text.clone(),
            Self::NoResponse => NO_RESPONSE_TEXT.to_string(),
            Self::Failed(err) => err.user_message(),
        }
    }
}

impl From<Result<AskResponse>> for DispatchOutcome {
    fn from(result: Result<AskResponse>) -> Self {
        match result {
            Ok(AskResponse { response: Some(text) }) => Self::Replied(text),
            Ok(AskResponse { response: None }) => Self::NoResponse,
            Err(err) => Self::Failed(err),
        }
    }
}

/// Scoped "request in flight" state.
///
/// Acquiring disables the send control and shows the placeholder; dropping
/// removes the placeholder, re-enables the control and restores focus.
pub struct PendingRequest<'a, U: ChatUi + ?Sized> {
    ui: &'a U,
    placeholder: MessageId,
}

impl<'a, U: ChatUi + ?Sized> PendingRequest<'a, U> {
    pub fn begin(ui: &'a U) -> Self {
        ui.set_send_enabled(false);
        let placeholder = ui.add_message(Message::placeholder());
        Self { ui, placeholder }
    }
}

impl<U: ChatUi + ?Sized> Drop for PendingRequest<'_, U> {
    fn drop(&mut self) {
        self.ui.remove_message(&self.placeholder);
        self.ui.set_send_enabled(true);
        self.ui.focus_input();
    }
}

/// Sends user text to the backend and renders the result
#[derive(Clone, Debug)]
pub struct Dispatcher<T, S> {
    transport: T,
    timer: S,
    timeout: Option<Duration>,
}

impl<T: ReceptionTransport, S: Timer> Dispatcher<T, S> {
    /// Dispatcher without a timeout: a request may wait indefinitely
    pub const fn new(transport: T, timer: S) -> Self {
        Self {
            transport,
            timer,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the full dispatch flow for `text`. Never fails: every failure is
    /// rendered as a bot message and returned as [`DispatchOutcome::Failed`].
    pub async fn send_message<U: ChatUi + ?Sized>(
        &self,
        ui: &U,
        text: &str,
        cancel: &CancellationToken,
    ) -> DispatchOutcome {
        ui.add_message(Message::user(text));
        let pending = PendingRequest::begin(ui);

        let outcome = DispatchOutcome::from(self.exchange(text, cancel).await);
        match &outcome {
            DispatchOutcome::Replied(reply) => {
                tracing::debug!(chars = reply.len(), "reception reply received");
            }
            DispatchOutcome::NoResponse => {
                tracing::warn!("reception response had no reply text");
            }
            DispatchOutcome::Failed(err) => {
                tracing::error!(error = %err, "reception request failed");
            }
        }

        ui.add_message(Message::bot(outcome.display_text()));
        drop(pending);

        outcome
    }

    async fn exchange(&self, text: &str, cancel: &CancellationToken) -> Result<AskResponse> {
        let request = AskRequest::new(text);

        let call = self.transport.ask(&request).fuse();
        let cancelled = cancel.cancelled().fuse();
        let expired = match self.timeout {
            Some(limit) => self.timer.sleep(limit),
            None => futures::future::pending().boxed_local(),
        }
        .fuse();
        futures::pin_mut!(call, cancelled, expired);

        futures::select_biased! {
            result = call => result,
            () = cancelled => Err(ReceptionError::Cancelled),
            () = expired => Err(ReceptionError::TimedOut(self.timeout.unwrap_or_default())),
        }
    }
}
