//! Chat relay between a browser frontend and the Gemini API.
//!
//! The relay forwards each user message together with the client-held
//! conversation history, lets the model call two local tools (current time
//! and current weather), and returns the final reply plus the extended
//! history.

pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::conversation::{ChatError, ConversationLoop, ErrorKind, LoopSettings};
pub use application::tooling::{ToolExecutor, ToolRegistry};
pub use config::AppConfig;
pub use infrastructure::model::{GeminiClient, ModelClient};
pub use infrastructure::server;

use cli::Cli;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

/// Wires configuration, tools and the Gemini client, then serves HTTP until
/// the listener fails.
pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    config::ensure_env_loaded();

    let config_path = cli.config.as_deref().map(Path::new);
    let app_config = AppConfig::load(config_path)?;
    debug!(
        model = %app_config.model.model,
        max_tool_steps = app_config.model.max_tool_steps,
        weather_enabled = app_config.weather.api_key.is_some(),
        "Configuration loaded"
    );

    let registry = ToolRegistry::with_default_tools(app_config.weather.clone())?;
    info!(tools = ?registry.names(), "Tool registry ready");
    let executor = ToolExecutor::new(Arc::new(registry));

    let model = Arc::new(GeminiClient::from_config(&app_config.model)?);
    let conversation = ConversationLoop::new(
        model,
        executor,
        LoopSettings::from(&app_config.model),
    );
    let state = Arc::new(server::ServerState::new(
        conversation,
        app_config.server.request_timeout,
    ));

    let addr = cli
        .addr
        .unwrap_or_else(|| app_config.server.bind_address());
    info!(%addr, "REST server starting");
    server::serve(state, &app_config.server.cors_origins, &addr).await?;

    Ok(())
}
