//! Terreno Server Entry Point
//!
//! Loads configuration from the environment, opens the prospect store, and
//! starts the Axum HTTP server.

use tracing_subscriber::EnvFilter;

use terreno_core::PropertyListing;
use terreno_storage::ProspectStore;
use terreno_web::{create_router, AppState, WebConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WebConfig::from_env()?;
    let addr = config.bind_addr()?;

    let store = ProspectStore::open(&config.db_path)?;
    tracing::info!(db = %config.db_path.display(), "prospect store opened");

    let state = AppState::new(store, PropertyListing::monterrico(), config);
    let app = create_router(state);

    tracing::info!(%addr, "starting Terreno server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
