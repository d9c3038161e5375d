use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use github_relay::config::{DEFAULT_GITHUB_API_URL, DEFAULT_PORT};
use github_relay::{create_app, GithubClient, GithubCredentials, RelayConfig, ServerState};

#[derive(clap::Parser)]
struct Opts {
    /// Port on which the relay listens.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    github_api_url: Url,

    /// GitHub account whose profile and repositories are relayed.
    #[arg(long, env = "GITHUB_USERNAME")]
    github_username: Option<String>,

    /// Token sent as a bearer credential to the GitHub API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

impl From<Opts> for RelayConfig {
    fn from(opts: Opts) -> Self {
        RelayConfig {
            port: opts.port,
            github_api_url: opts.github_api_url,
            credentials: GithubCredentials::new(opts.github_username, opts.github_token),
        }
    }
}

async fn server(config: RelayConfig) -> anyhow::Result<()> {
    if config.credentials.complete().is_none() {
        tracing::warn!("GITHUB_USERNAME or GITHUB_TOKEN is not set, issues cannot be created");
    }

    let github = GithubClient::new(config.github_api_url, config.credentials)?;
    let app = create_app(ServerState::new(github));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind to {addr}"))?;
    tracing::info!("Server is running on port {}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    runtime.block_on(server(opts.into()))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
