use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::generation::generator::GenerationConfig;
use crate::generation::prompts::DEFAULT_SYSTEM_PROMPT;
use crate::llm_client::LlmSettings;
use crate::markdown::{LineCapPolicy, NormalizeOptions, QualityGate};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Application configuration loaded from environment variables.
/// Every variable is optional; missing credentials only fail the requests that need them.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub openrouter_base_url: String,
    pub openrouter_api_keys: Vec<String>,
    pub openrouter_models: Vec<String>,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    pub system_prompt_path: Option<PathBuf>,
    pub github_token: Option<String>,
    pub normalize: NormalizeOptions,
    pub min_resume_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let policy = optional_env("LINE_CAP_POLICY").unwrap_or_else(|| "warn".to_string());
        let normalize = parse_line_cap(
            &policy,
            parse_env("MAX_CONTENT_LINES")?,
            parse_env("MAX_TOTAL_LINES")?,
        )?;

        Ok(Config {
            port: parse_env("PORT")?.unwrap_or(8000),
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            openrouter_base_url: optional_env("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openrouter_api_keys: parse_list(&optional_env("OPENROUTER_API_KEYS").unwrap_or_default()),
            openrouter_models: parse_list(&optional_env("OPENROUTER_MODELS").unwrap_or_default()),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS")?.unwrap_or(2000),
            llm_temperature: parse_env("LLM_TEMPERATURE")?.unwrap_or(0.1),
            system_prompt_path: optional_env("SYSTEM_PROMPT_PATH").map(PathBuf::from),
            github_token: optional_env("GITHUB_TOKEN"),
            normalize,
            min_resume_chars: parse_env("MIN_RESUME_CHARS")?.unwrap_or(100),
        })
    }

    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            base_url: self.openrouter_base_url.clone(),
            api_keys: self.openrouter_api_keys.clone(),
            models: self.openrouter_models.clone(),
            max_tokens: self.llm_max_tokens,
            temperature: self.llm_temperature,
        }
    }

    /// Builds the per-call generation settings, reading the system prompt file if one is set.
    pub fn generation_config(&self) -> Result<GenerationConfig> {
        Ok(GenerationConfig {
            system_prompt: load_system_prompt(self.system_prompt_path.as_deref())?,
            min_resume_chars: self.min_resume_chars,
            normalize: self.normalize,
            quality: QualityGate::default(),
        })
    }
}

/// Reads the system prompt from `path`, or returns the built-in prompt when there is none.
pub fn load_system_prompt(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(DEFAULT_SYSTEM_PROMPT.to_string());
    };

    let prompt = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read system prompt from {}", path.display()))?;
    if prompt.trim().is_empty() {
        bail!("System prompt file {} is empty", path.display());
    }
    Ok(prompt)
}

/// Comma-separated list; blank entries are dropped.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_line_cap(
    policy: &str,
    max_content_lines: Option<usize>,
    max_total_lines: Option<usize>,
) -> Result<NormalizeOptions> {
    let mut options = match policy.trim().to_ascii_lowercase().as_str() {
        "warn" => NormalizeOptions::default(),
        "truncate" => NormalizeOptions::truncating(),
        other => bail!("LINE_CAP_POLICY must be 'warn' or 'truncate', got '{other}'"),
    };

    if let Some(cap) = max_content_lines {
        options.max_content_lines = cap;
    }
    if let (LineCapPolicy::Truncate { max_total_lines: total }, Some(value)) =
        (&mut options.policy, max_total_lines)
    {
        *total = value;
    }
    Ok(options)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{key} has an invalid value: '{raw}'"))
        })
        .transpose()
}
