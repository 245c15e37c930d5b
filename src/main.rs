use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{info, warn};

/// Landing page and waitlist signup server, persisting entries to a JSON
/// file in a GitHub repository
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long, short = 'p')]
    port: Option<u16>,
}

mod config;
mod error;
mod github;
mod models;
mod web;

use config::{AppConfig, GithubConfig};
use github::GithubService;
use web::{start_web_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let github = match GithubConfig::from_env() {
        Some(github_config) => {
            info!(
                "Waitlist storage: {}/{} via the GitHub contents API",
                github_config.repo_owner, github_config.repo_name
            );
            Some(Arc::new(GithubService::new(&github_config)))
        }
        None => {
            warn!(
                "GitHub storage not configured; waitlist submissions will be rejected. \
                 Set GITHUB_TOKEN, GITHUB_REPO_OWNER and GITHUB_REPO_NAME to enable them."
            );
            None
        }
    };

    let state = AppState {
        github,
        templates_dir: config.templates_dir.clone(),
    };

    info!("Serving templates from {}", config.templates_dir.display());
    start_web_server(config, state).await
}
