//! Environment-backed configuration, read once at process start.
//!
//! Handlers never look up environment variables themselves; everything they
//! need is loaded here and passed down explicitly.

use std::path::PathBuf;

/// Server bind address and template directory
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub templates_dir: PathBuf,
}

impl AppConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            templates_dir: std::env::var("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("templates")),
        }
    }
}

/// GitHub credentials for the waitlist store
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    pub repo_owner: String,
    pub repo_name: String,
}

impl GithubConfig {
    /// Returns `None` when any of the three variables is missing or empty.
    /// Submissions are disabled in that case; page rendering still works.
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|v| !v.is_empty())?;
        let repo_owner = std::env::var("GITHUB_REPO_OWNER")
            .ok()
            .filter(|v| !v.is_empty())?;
        let repo_name = std::env::var("GITHUB_REPO_NAME")
            .ok()
            .filter(|v| !v.is_empty())?;

        Some(Self {
            token,
            repo_owner,
            repo_name,
        })
    }
}
