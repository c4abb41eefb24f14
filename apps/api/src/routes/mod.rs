pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extract::handlers as extract;
use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Generation
        .route("/generate-resume", post(generation::handle_generate))
        .route(
            "/get-system-prompt",
            get(generation::handle_get_system_prompt),
        )
        // Documents
        .route("/export-resume", post(render::handle_export))
        .route("/extract-resume", post(extract::handle_extract))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::generator::tests::{StubGenerator, StubProfiles, GOOD_RESUME};
    use crate::generation::generator::{GenerationConfig, ResumeGenerator};

    const BOUNDARY: &str = "X-ONEPAGER-BOUNDARY";

    fn app_with(generator: StubGenerator) -> Router {
        let state = AppState {
            resumes: ResumeGenerator::new(
                Arc::new(generator),
                Arc::new(StubProfiles::with_readme("Rust engineer")),
            ),
            generation: Arc::new(GenerationConfig {
                system_prompt: "Write resumes.".to_string(),
                ..Default::default()
            }),
        };
        build_router(state)
    }

    fn app() -> Router {
        app_with(StubGenerator::answering(GOOD_RESUME))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn post_upload(filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/extract-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request")
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).expect("json body")
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let response = app().oneshot(get("/")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Resume Generator API");
        assert_eq!(body["endpoints"].as_object().expect("map").len(), 5);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get("/health")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": "healthy", "service": "resume-generator"})
        );
    }

    #[tokio::test]
    async fn test_get_system_prompt() {
        let response = app().oneshot(get("/get-system-prompt")).await.expect("response");
        let body = body_json(response).await;
        assert_eq!(body["prompt"], "Write resumes.");
        assert_eq!(body["status"], "success");
    }

    #[tokio::test]
    async fn test_generate_resume() {
        let response = app()
            .oneshot(post_json(
                "/generate-resume",
                json!({"github_username": "jane", "priority": "projects"}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert!(body["resume"].as_str().expect("resume").starts_with("# Jane Doe\n"));
        assert_eq!(body["warnings"], json!([]));
    }

    #[tokio::test]
    async fn test_generate_requires_input() {
        let response = app()
            .oneshot(post_json("/generate-resume", json!({})))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_llm_failure_is_500() {
        let response = app_with(StubGenerator::failing())
            .oneshot(post_json("/generate-resume", json!({"additional_info": "Rust"})))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_export_markdown_download() {
        let markdown = "# Jane Doe\n## Skills\n- Rust";
        let response = app()
            .oneshot(post_json(
                "/export-resume",
                json!({"markdown_content": markdown, "format": "md"}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/markdown");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=Jane_Doe.md"
        );
        assert_eq!(body_bytes(response).await, markdown.as_bytes());
    }

    #[tokio::test]
    async fn test_export_defaults_to_pdf() {
        let response = app()
            .oneshot(post_json(
                "/export-resume",
                json!({"markdown_content": "# Jane Doe\n- Rust"}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert!(body_bytes(response).await.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_export_rejects_unknown_format() {
        let response = app()
            .oneshot(post_json(
                "/export-resume",
                json!({"markdown_content": "# Jane", "format": "html"}),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
        assert_eq!(
            body["error"]["message"],
            "Invalid format. Use 'pdf', 'docx', or 'md'"
        );
    }

    #[tokio::test]
    async fn test_extract_text_upload() {
        let response = app()
            .oneshot(post_upload("notes.txt", b"  Jane Doe\nRust engineer \n"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"text": "Jane Doe\nRust engineer", "filename": "notes.txt", "status": "success"})
        );
    }

    #[tokio::test]
    async fn test_extract_rejects_unsupported_upload() {
        let response = app()
            .oneshot(post_upload("photo.png", b"\x89PNG"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "UNSUPPORTED_FORMAT");
    }
}
