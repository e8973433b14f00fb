// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `maitre serve`: wire the orchestrator to the HTTP gateway.

use std::sync::Arc;
use std::time::Duration;

use maitre_agent::{ChatOrchestrator, SystemPrompt};
use maitre_anthropic::AnthropicProvider;
use maitre_config::MaitreConfig;
use maitre_core::MaitreError;
use maitre_gateway::{GatewayState, ServerConfig};
use maitre_resilience::{SlidingWindowLimiter, spawn_sweeper};
use maitre_router::ModelRouter;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::shutdown;

/// Run the gateway until SIGINT or SIGTERM.
pub async fn run_serve(config: MaitreConfig) -> Result<(), MaitreError> {
    init_tracing(&config.agent.log_level);

    let provider = Arc::new(AnthropicProvider::from_config(&config.anthropic)?);
    let prompt = SystemPrompt::from_config(&config.agent).await?;
    info!(
        prompt_chars = prompt.as_str().len(),
        context_file = config.agent.context_file.as_deref().unwrap_or("none"),
        "system prompt assembled"
    );

    let limiter = Arc::new(SlidingWindowLimiter::from_config(&config.rate_limit));
    info!(
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        "rate limiter ready"
    );

    let router = ModelRouter::new(config.routing.clone());
    let orchestrator = ChatOrchestrator::new(
        provider,
        Arc::clone(&limiter) as Arc<dyn maitre_resilience::RateLimiter>,
        router,
        config.chat.clone(),
        prompt,
    );

    let cancel = shutdown::install_signal_handler();
    let sweeper = spawn_sweeper(
        limiter,
        Duration::from_secs(config.rate_limit.sweep_interval_secs),
        cancel.clone(),
    );

    let server_config = ServerConfig::from(&config.gateway);
    let state = GatewayState::new(Arc::new(orchestrator));
    let result = maitre_gateway::start_server(&server_config, state, cancel.clone()).await;

    // Stop the sweeper even when the server failed to start.
    cancel.cancel();
    join_sweeper(sweeper).await;

    result?;
    info!("maitre serve shutdown complete");
    Ok(())
}

/// Wait for the sweeper to stop, reporting a panic or cancellation.
async fn join_sweeper(sweeper: JoinHandle<()>) {
    if let Err(e) = sweeper.await {
        warn!(error = %e, "rate-limit sweeper task failed");
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("maitre={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
