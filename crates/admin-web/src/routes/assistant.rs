//! Assistant routes. Both always answer 200; failures become scripted replies.

use assistant_core::{ChatReply, IssueReport, TroubleshootOutcome};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::{AdminError, Result};
use crate::extract::AppJson;
use crate::state::AppState;

/// Chat request body.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Diagnose a reported device problem.
pub async fn troubleshoot(
    State(state): State<AppState>,
    AppJson(report): AppJson<IssueReport>,
) -> Result<Json<TroubleshootOutcome>> {
    if report.description.trim().is_empty() {
        return Err(AdminError::BadRequest(
            "description cannot be empty".to_string(),
        ));
    }
    Ok(Json(state.troubleshooter.diagnose(&report).await))
}

/// Answer a chat message.
pub async fn chat(
    State(state): State<AppState>,
    AppJson(req): AppJson<ChatRequest>,
) -> Result<Json<ChatReply>> {
    if req.message.trim().is_empty() {
        return Err(AdminError::BadRequest("message cannot be empty".to_string()));
    }
    Ok(Json(state.troubleshooter.chat(&req.message).await))
}
