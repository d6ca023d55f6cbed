//! Rewrite Studio Daemon - browser front end for rewriting and summarizing text
//!
//! Serves the page and JSON API, forwarding each request to the configured
//! chat-completion provider.

use anyhow::{Context, Result};
use std::sync::Arc;
use studio_common::{CompletionClient, Config, HttpLlmClient, Studio};
use studiod::server::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // .env first so RUST_LOG from it reaches the filter
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Rewrite Studio daemon v{} starting", env!("CARGO_PKG_VERSION"));

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::load().context("Failed to load configuration")?;
    let client = Arc::new(HttpLlmClient::new(&config.llm).context("Refusing to start")?);
    info!("Using model {} at {}", client.model(), config.llm.endpoint);

    let completion: Arc<dyn CompletionClient> = client.clone();
    let state = AppState::new(Studio::new(completion), client.model());

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(server::run(state, &config.server))?;
    drop(runtime);

    // The blocking HTTP client must be released outside the async runtime
    drop(client);
    Ok(())
}
