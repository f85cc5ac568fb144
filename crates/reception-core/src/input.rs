//! Input Handler
//!
//! Entry points wired to the submit gesture and the quick-question buttons.

use tokio_util::sync::CancellationToken;

use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::timer::Timer;
use crate::transport::ReceptionTransport;
use crate::view::ChatUi;

/// Read the text field and dispatch it.
///
/// Whitespace-only input is a no-op (`None`). Otherwise the field is cleared
/// before the request goes out, whatever its outcome.
pub async fn submit<U, T, S>(
    ui: &U,
    dispatcher: &Dispatcher<T, S>,
    cancel: &CancellationToken,
) -> Option<DispatchOutcome>
where
    U: ChatUi + ?Sized,
    T: ReceptionTransport,
    S: Timer,
{
    let raw = ui.input_value();
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    ui.set_input_value("");
    Some(dispatcher.send_message(ui, text, cancel).await)
}

/// Pre-fill the text field with a canned question and submit it.
///
/// Not guarded against an in-flight request; the widget only disables the
/// send button.
pub async fn ask_question<U, T, S>(
    ui: &U,
    dispatcher: &Dispatcher<T, S>,
    cancel: &CancellationToken,
    question: &str,
) -> Option<DispatchOutcome>
where
    U: ChatUi + ?Sized,
    T: ReceptionTransport,
    S: Timer,
{
    ui.set_input_value(question);
    submit(ui, dispatcher, cancel).await
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;

    use super::*;
    use crate::error::Result;
    use crate::message::Sender;
    use crate::timer::TokioTimer;
    use crate::view::HeadlessUi;
    use crate::wire::{AskRequest, AskResponse};

    #[derive(Default)]
    struct RecordingTransport {
        queries: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl ReceptionTransport for RecordingTransport {
        async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
            self.queries.borrow_mut().push(request.user_query.clone());
            Ok(AskResponse::reply("noted"))
        }
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let ui = HeadlessUi::new();
        let dispatcher = Dispatcher::new(RecordingTransport::default(), TokioTimer);

        for blank in ["", "   ", "\n\t "] {
            ui.set_input_value(blank);
            assert!(submit(&ui, &dispatcher, &CancellationToken::new()).await.is_none());
        }

        assert!(ui.log().is_empty());
        assert!(dispatcher_queries(&dispatcher).is_empty());
    }

    #[tokio::test]
    async fn test_input_is_trimmed_and_cleared() {
        let ui = HeadlessUi::new();
        let dispatcher = Dispatcher::new(RecordingTransport::default(), TokioTimer);
        ui.set_input_value("  Where is the ER?  ");

        let outcome = submit(&ui, &dispatcher, &CancellationToken::new()).await;

        assert!(matches!(outcome, Some(DispatchOutcome::Replied(_))));
        assert_eq!(ui.input_value(), "");
        assert_eq!(dispatcher_queries(&dispatcher), ["Where is the ER?"]);
        let log = ui.log();
        assert_eq!(log.messages()[0].text, "Where is the ER?");
        assert_eq!(log.messages()[0].sender, Sender::User);
    }

    #[tokio::test]
    async fn test_quick_question_dispatches() {
        let ui = HeadlessUi::new();
        let dispatcher = Dispatcher::new(RecordingTransport::default(), TokioTimer);

        ask_question(&ui, &dispatcher, &CancellationToken::new(), "What are the visiting hours?").await;

        assert_eq!(dispatcher_queries(&dispatcher), ["What are the visiting hours?"]);
        assert_eq!(ui.log().count_from(Sender::Bot), 1);
        assert_eq!(ui.input_value(), "");
    }

    fn dispatcher_queries(dispatcher: &Dispatcher<RecordingTransport, TokioTimer>) -> Vec<String> {
        dispatcher.transport().queries.borrow().clone()
    }
}
