//! Gleaner Server
//!
//! HTTP front end for note generation and span lookup.
//!
//! - `POST /api/generate` streams notes as server-sent events
//! - `POST /api/locate` resolves the source span behind a note
//! - `GET /api/projects/:project_id/notes` lists saved notes
//! - `GET /health` reports liveness and the active model

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod wire;

use config::ServerConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The configured provider could not be built
    #[error("Provider error: {0}")]
    Provider(#[from] gleaner_llm::LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the fmt subscriber, honouring `RUST_LOG` and defaulting to `info`
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A subscriber may already be installed by an embedding process
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Start the HTTP server
///
/// Builds the provider, wires the application state and serves until the
/// listener fails.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing();
    config.validate()?;

    let provider = config.provider.build()?;

    info!("Starting Gleaner server");
    info!("Bind address: {}", config.bind_addr());
    info!("Provider: {:?}", config.provider.kind);
    info!("Max text length: {} chars", config.extractor.max_text_length);

    let state = AppState::new(provider, &config);
    info!("Model: {}", state.model);

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
