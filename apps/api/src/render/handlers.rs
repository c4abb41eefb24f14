//! Axum route handler for resume export.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::render::{export, ExportFormat};

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub markdown_content: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "pdf".to_string()
}

/// POST /export-resume
///
/// Renders the submitted markdown as a file download. Unknown formats are rejected
/// before any rendering starts.
pub async fn handle_export(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    let format: ExportFormat = request.format.parse()?;
    let markdown = request.markdown_content;

    let exported = if format.is_binary() {
        tokio::task::spawn_blocking(move || export(&markdown, format))
            .await
            .map_err(|e| AppError::Internal(e.into()))??
    } else {
        export(&markdown, format)?
    };

    info!(
        "Exported {} ({} bytes, {})",
        exported.filename,
        exported.bytes.len(),
        format
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename={}",
        exported.filename
    ))
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(exported.media_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.bytes,
    )
        .into_response())
}
