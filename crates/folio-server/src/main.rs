//! Folio Server - HTTP API over the native engine facades

use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod error;
mod state;

use folio_core::EngineConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_server=debug,folio_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio server");

    let config = match std::env::var_os("FOLIO_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            EngineConfig::from_file(&path)?
        }
        None => EngineConfig::default(),
    };
    info!("Data directory: {:?}", config.data_dir);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
