//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::GenerateRequest;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: String,
    pub status: &'static str,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SystemPromptResponse {
    pub prompt: String,
    pub status: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-resume
///
/// Full generation pipeline: README fetch → prompt → model → normalize → quality gate.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let generated = state.resumes.generate(&request, &state.generation).await?;

    Ok(Json(ResumeResponse {
        resume: generated.resume,
        status: "success",
        warnings: generated.warnings,
    }))
}

/// GET /get-system-prompt
///
/// Returns the system prompt used when a request does not bring its own.
pub async fn handle_get_system_prompt(State(state): State<AppState>) -> Json<SystemPromptResponse> {
    Json(SystemPromptResponse {
        prompt: state.generation.system_prompt.clone(),
        status: "success",
    })
}
