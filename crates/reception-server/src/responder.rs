//! Reception Responders
//!
//! A responder turns one visitor query into reply text. Each call is
//! stateless: the handler mints a fresh session id per request and nothing
//! is remembered between calls.
//!
//! [`DirectoryResponder`] answers from the hospital records; whatever it
//! cannot route goes to its fallback, normally the [`OllamaResponder`].

use std::sync::Arc;

use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
};

use crate::data::HospitalData;
use crate::error::{Result, ServerError};
use crate::intent;
use crate::tool::{ToolCall, ToolRegistry, ToolResult};
use crate::tools;

/// Persona given to the model. The model only sees questions the records
/// could not answer, so it must not make figures up.
pub const RECEPTION_PROMPT: &str = "You are the reception assistant of a hospital. \
You do not have access to hospital records: questions about specific hospitals, \
departments, doctors or patients are answered from the records before they reach you. \
Help with general questions about visiting, finding your way and front-desk procedures. \
Never invent names, figures, room numbers or schedules. If a visitor needs specific \
information, suggest they ask again naming the hospital, department, doctor or patient, \
or contact the front desk. Be concise and use short bullet lists for enumerations.";

/// Produces reply text for a visitor query
#[async_trait]
pub trait Responder: Send + Sync {
    /// `Ok(None)` means the backend produced no text
    async fn respond(&self, session_id: &str, query: &str) -> Result<Option<String>>;

    /// Whether the backing service is reachable
    async fn health_check(&self) -> bool;
}

/// Ollama connection settings
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,

    /// Model used for replies
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            model: "llama3.2".into(),
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("OLLAMA_HOST").unwrap_or(defaults.host);
        let port = std::env::var("OLLAMA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let model = std::env::var("RECEPTION_MODEL").unwrap_or(defaults.model);

        Self { host, port, model }
    }
}

/// Responder backed by a local Ollama model
pub struct OllamaResponder {
    client: Ollama,
    model: String,
}

impl OllamaResponder {
    pub fn from_config(config: &OllamaConfig) -> Self {
        Self {
            client: Ollama::new(config.host.clone(), config.port),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_messages(query: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(RECEPTION_PROMPT.to_string()),
            ChatMessage::user(query.to_string()),
        ]
    }
}

#[async_trait]
impl Responder for OllamaResponder {
    async fn respond(&self, session_id: &str, query: &str) -> Result<Option<String>> {
        tracing::debug!(session_id, model = %self.model, "Forwarding query to Ollama");

        let request = ChatMessageRequest::new(self.model.clone(), Self::build_messages(query));
        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| ServerError::Responder(e.to_string()))?;

        let content = response.message.content;
        Ok((!content.trim().is_empty()).then_some(content))
    }

    async fn health_check(&self) -> bool {
        match self.client.list_local_models().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                false
            }
        }
    }
}

/// Answers from the hospital records, falling back for anything else
pub struct DirectoryResponder {
    data: Arc<HospitalData>,
    tools: ToolRegistry,
    fallback: Option<Arc<dyn Responder>>,
}

impl DirectoryResponder {
    pub fn new(data: Arc<HospitalData>) -> Self {
        let tools = tools::registry(&data);
        Self {
            data,
            tools,
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn Responder>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub const fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run a call; errors become a failed result so the visitor still gets text
    async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        match self.tools.execute(call).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(tool = %call.name, error = %e, "Tool execution failed");
                let mut result = ToolResult::failure(&call.name, e.user_message());
                result.id.clone_from(&call.id);
                result
            }
        }
    }

    /// Reply listing what the records can answer
    fn help(&self) -> String {
        let mut out = String::from("I can answer questions about:\n");
        for schema in self.tools.schemas() {
            out.push_str("- ");
            out.push_str(&schema.description);
            out.push('\n');
        }
        out.push_str("\nTry naming a hospital, department, doctor or patient.");
        out
    }
}

#[async_trait]
impl Responder for DirectoryResponder {
    async fn respond(&self, session_id: &str, query: &str) -> Result<Option<String>> {
        if let Some(call) = intent::route(query, &self.data) {
            let call = call.with_id(session_id);
            tracing::debug!(session_id, tool = %call.name, action = ?call.str_arg("action"), "Answering from records");

            let result = self.execute_tool(&call).await;
            if !result.success {
                tracing::warn!(session_id, tool = %result.name, "Lookup failed: {}", result.output);
            }
            return Ok(Some(result.output));
        }

        match &self.fallback {
            Some(fallback) => fallback.respond(session_id, query).await,
            None => Ok(Some(self.help())),
        }
    }

    async fn health_check(&self) -> bool {
        match &self.fallback {
            Some(fallback) => fallback.health_check().await,
            None => true,
        }
    }
}
