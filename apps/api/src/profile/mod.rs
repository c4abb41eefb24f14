//! GitHub profile README lookup.
//!
//! A profile README lives in the repository named after the user
//! (`github.com/<user>/<user>`). Fetch failures never propagate: the generator
//! simply works without profile content.

use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

const GITHUB_API_BASE: &str = "https://api.github.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Returns profile text for a username, or an empty string when none is available.
///
/// Carried in `AppState` as `Arc<dyn ProfileFetcher>`.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch(&self, username: &str) -> String;
}

pub struct GithubReadmeFetcher {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubReadmeFetcher {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_api_base(GITHUB_API_BASE, token)
    }

    pub fn with_api_base(api_base: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn try_fetch(&self, username: &str) -> Result<String> {
        let url = format!("{}/repos/{username}/{username}/readme", self.api_base);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.raw");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            bail!("GitHub returned {status} for {url}");
        }

        Ok(response.text().await?)
    }
}

/// GitHub logins are alphanumeric with single inner hyphens, at most 39 characters.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !username.starts_with('-')
        && !username.ends_with('-')
}

#[async_trait]
impl ProfileFetcher for GithubReadmeFetcher {
    async fn fetch(&self, username: &str) -> String {
        let username = username.trim();
        if username.is_empty() {
            return String::new();
        }
        if !is_valid_username(username) {
            warn!("Skipping README fetch for invalid GitHub username {username:?}");
            return String::new();
        }

        match self.try_fetch(username).await {
            Ok(readme) => {
                debug!("Fetched README for {username} ({} bytes)", readme.len());
                readme
            }
            Err(e) => {
                warn!("Could not fetch README for {username}: {e}");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Path, http::StatusCode, routing::get, Router};

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{addr}")
    }

    fn mock_github() -> Router {
        Router::new().route(
            "/repos/:owner/:repo/readme",
            get(
                |Path((owner, repo)): Path<(String, String)>, headers: axum::http::HeaderMap| async move {
                    let accept = headers
                        .get("accept")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    if owner == "jane" && repo == "jane" && accept == "application/vnd.github.raw" {
                        (StatusCode::OK, "# Hi, I'm Jane".to_string())
                    } else {
                        (StatusCode::NOT_FOUND, "Not Found".to_string())
                    }
                },
            ),
        )
    }

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("jane"));
        assert!(is_valid_username("jane-doe42"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("-jane"));
        assert!(!is_valid_username("jane/other"));
        assert!(!is_valid_username("../etc"));
        assert!(!is_valid_username(&"a".repeat(40)));
    }

    #[tokio::test]
    async fn test_fetch_returns_readme() {
        let base = serve(mock_github()).await;
        let fetcher = GithubReadmeFetcher::with_api_base(&base, None).expect("fetcher");
        assert_eq!(fetcher.fetch("jane").await, "# Hi, I'm Jane");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_empty() {
        let base = serve(mock_github()).await;
        let fetcher = GithubReadmeFetcher::with_api_base(&base, None).expect("fetcher");
        assert_eq!(fetcher.fetch("nobody").await, "");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_empty() {
        let fetcher =
            GithubReadmeFetcher::with_api_base("http://127.0.0.1:9", None).expect("fetcher");
        assert_eq!(fetcher.fetch("jane").await, "");
    }

    #[tokio::test]
    async fn test_blank_or_invalid_username_skips_request() {
        let fetcher =
            GithubReadmeFetcher::with_api_base("http://127.0.0.1:9", None).expect("fetcher");
        assert_eq!(fetcher.fetch("   ").await, "");
        assert_eq!(fetcher.fetch("a/b").await, "");
    }
}
