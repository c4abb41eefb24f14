use std::sync::Arc;

use crate::generation::generator::{GenerationConfig, ResumeGenerator};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation pipeline over the content generator and profile fetcher.
    pub resumes: ResumeGenerator,
    pub generation: Arc<GenerationConfig>,
}
