mod config;
mod errors;
mod extract;
mod generation;
mod llm_client;
mod markdown;
mod profile;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::generator::ResumeGenerator;
use crate::llm_client::select::RandomChooser;
use crate::llm_client::LlmClient;
use crate::profile::GithubReadmeFetcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume generator API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm_settings = config.llm_settings();
    if llm_settings.api_keys.is_empty() || llm_settings.models.is_empty() {
        warn!("OPENROUTER_API_KEYS or OPENROUTER_MODELS is empty; generation requests will fail");
    }
    info!(
        "LLM client initialized ({} keys, {} models)",
        llm_settings.api_keys.len(),
        llm_settings.models.len()
    );
    let llm = LlmClient::new(llm_settings, Arc::new(RandomChooser))?;

    // Initialize README fetcher
    let profiles = GithubReadmeFetcher::new(config.github_token.clone())?;

    let generation = config.generation_config()?;
    info!(
        "Generation config: {} content lines max ({:?}), {} chars min",
        generation.normalize.max_content_lines,
        generation.normalize.policy,
        generation.min_resume_chars
    );

    // Build app state
    let state = AppState {
        resumes: ResumeGenerator::new(Arc::new(llm), Arc::new(profiles)),
        generation: Arc::new(generation),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
