//! Curie CDS server
//!
//! Run with: cargo run -p curie-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use curie_web::{config::Config, router::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("curie=debug,info")),
        )
        .init();

    info!("Curie CDS starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!(data_dir = %config.data.dir.display(), "Configuration loaded");

    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
