//! HTTP Handlers

use axum::{Json, extract::State};
use reception_core::{AskRequest, AskResponse};
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Reply sent when the responder produced no text
pub const NO_RESPONSE_REPLY: &str = "No response received.";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub responder_connected: bool,
}

/// Health check endpoint. Reports the cached responder status and never
/// waits on the responder itself.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        responder_connected: state.health.is_connected(),
    })
}

/// Reception endpoint: one query in, one reply out
pub async fn ask_reception(
    State(state): State<AppState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    // Stateless: every request gets its own session
    let session_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(%session_id, chars = payload.user_query.len(), "Reception query");

    let reply = state
        .responder
        .respond(&session_id, &payload.user_query)
        .await?
        .unwrap_or_else(|| NO_RESPONSE_REPLY.into());

    Ok(Json(AskResponse::reply(reply)))
}
