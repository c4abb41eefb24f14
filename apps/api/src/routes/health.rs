use axum::Json;
use serde_json::{json, Value};

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "resume-generator"
    }))
}

/// GET /
/// Service banner with the endpoint map.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Generator API",
        "version": "1.0.0",
        "endpoints": {
            "/generate-resume": "POST - Generate one-page resume",
            "/export-resume": "POST - Export resume to PDF/DOCX/MD",
            "/get-system-prompt": "GET - Get current system prompt",
            "/extract-resume": "POST - Extract text from uploaded resume",
            "/health": "GET - Health check"
        }
    }))
}
