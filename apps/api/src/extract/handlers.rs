//! Axum route handler for resume uploads.

use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::extract_text;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub filename: String,
    pub status: &'static str,
}

/// POST /extract-resume
///
/// Accepts a multipart upload with a `file` field and returns its plain text.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let (filename, data) = read_file_field(&mut multipart).await?;

    let name = filename.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&name, &data))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    info!("Extracted {} characters from {}", text.chars().count(), filename);

    Ok(Json(ExtractResponse {
        text,
        filename,
        status: "success",
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return Ok((filename, data));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
