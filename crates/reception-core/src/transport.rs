//! Reception Transport
//!
//! One request/response exchange with the backend. No streaming, no retries.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ReceptionError, Result};
use crate::wire::{AskRequest, AskResponse};

/// Sends a query to the reception backend.
///
/// Futures are `?Send`: in the browser the HTTP client is bound to the
/// single-threaded event loop.
#[async_trait(?Send)]
pub trait ReceptionTransport {
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse>;
}

/// Receives every raw response body before it is parsed.
///
/// `tracing` has no subscriber in the browser, so the widget installs one of
/// these to put bodies on the developer console.
pub type BodyObserver = Arc<dyn Fn(&str) + Send + Sync>;

/// JSON-over-HTTP transport built on `reqwest`
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    observer: Option<BodyObserver>,
}

impl HttpTransport {
    /// `url` must be absolute (see [`crate::config::resolve_endpoint`]).
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            observer: None,
        }
    }

    #[must_use]
    pub fn observe_bodies(mut self, observer: BodyObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .field("observed", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl ReceptionTransport for HttpTransport {
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), url = %self.url, "reception request rejected");
            return Err(ReceptionError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        tracing::debug!(body = %body, "reception response");
        if let Some(observe) = &self.observer {
            observe(&body);
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ReceptionError::Parse(e.to_string()))?;
        Ok(AskResponse::from_value(&value))
    }
}
