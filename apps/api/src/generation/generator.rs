//! Resume Generation: orchestrates the full generation pipeline.
//!
//! Flow: fetch profile README → extract contact info → build user prompt →
//!       content generator → length check → normalize → quality gate.
//!
//! Every tunable comes in through `GenerationConfig`; nothing is read from the
//! environment here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::DEFAULT_SYSTEM_PROMPT;
use crate::generation::user_prompt::{build_user_prompt, Priority, PromptInputs};
use crate::llm_client::ContentGenerator;
use crate::markdown::{normalize_with, NormalizeOptions, QualityGate};
use crate::profile::ProfileFetcher;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Explicit generation settings, derived from `Config` once at startup.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub system_prompt: String,
    /// Raw model output shorter than this (after trimming) is rejected.
    pub min_resume_chars: usize,
    pub normalize: NormalizeOptions,
    pub quality: QualityGate,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            min_resume_chars: 100,
            normalize: NormalizeOptions::default(),
            quality: QualityGate::default(),
        }
    }
}

/// Request body for resume generation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub github_username: Option<String>,
    pub additional_info: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub custom_system_prompt: Option<String>,
    pub resume_template: Option<String>,
}

/// A normalized resume that passed the quality gate.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    pub resume: String,
    /// Soft quality warnings; informational only.
    pub warnings: Vec<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// The generation pipeline bound to its collaborators. Cheap to clone.
#[derive(Clone)]
pub struct ResumeGenerator {
    generator: Arc<dyn ContentGenerator>,
    profiles: Arc<dyn ProfileFetcher>,
}

impl ResumeGenerator {
    pub fn new(generator: Arc<dyn ContentGenerator>, profiles: Arc<dyn ProfileFetcher>) -> Self {
        Self {
            generator,
            profiles,
        }
    }

    pub async fn generate(
        &self,
        request: &GenerateRequest,
        config: &GenerationConfig,
    ) -> Result<GeneratedResume, AppError> {
        generate_resume(self.generator.as_ref(), self.profiles.as_ref(), request, config).await
    }
}

/// Runs the full generation pipeline for one request.
///
/// Errors:
/// - `Validation` when neither a username nor additional info is given
/// - `Llm` when the content generator fails
/// - `Generation` when the output is too short or fails a hard quality check
pub async fn generate_resume(
    generator: &dyn ContentGenerator,
    profiles: &dyn ProfileFetcher,
    request: &GenerateRequest,
    config: &GenerationConfig,
) -> Result<GeneratedResume, AppError> {
    let username = non_blank(&request.github_username);
    let additional_info = request.additional_info.as_deref().unwrap_or_default();

    if username.is_none() && additional_info.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide either a GitHub username or additional information".to_string(),
        ));
    }

    // Step 1: Profile README (empty on any failure)
    let readme = match username {
        Some(user) => profiles.fetch(user).await,
        None => String::new(),
    };

    // Step 2: Prompt
    let prompt = build_user_prompt(&PromptInputs {
        github_username: username.unwrap_or_default(),
        readme: &readme,
        additional_info,
        priority: request.priority,
        template: request.resume_template.as_deref(),
    });
    let system = non_blank(&request.custom_system_prompt).unwrap_or(&config.system_prompt);

    // Step 3: Model call
    let raw = generator.generate(system, &prompt).await?;

    if raw.trim().chars().count() < config.min_resume_chars {
        return Err(AppError::Generation(
            "Generated resume is too short or empty".to_string(),
        ));
    }

    // Step 4: Normalize and gate
    let resume = normalize_with(&raw, &config.normalize);
    let verdict = config.quality.check(&resume);

    if !verdict.warnings.is_empty() {
        warn!("Resume warnings: {:?}", verdict.warnings);
    }

    if !verdict.valid {
        return Err(AppError::Generation(format!(
            "Generated resume has critical issues: {}",
            verdict.issues.join("; ")
        )));
    }

    info!(
        "Generated resume: {} words, {} content lines",
        resume.split_whitespace().count(),
        verdict.line_count
    );

    Ok(GeneratedResume {
        resume,
        warnings: verdict.warnings,
    })
}
