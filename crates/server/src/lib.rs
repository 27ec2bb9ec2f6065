//! HTTP API for the Shelf catalog.

pub mod api;
pub mod error;
pub mod state;

pub use api::{create_app, create_router};
pub use error::{ServerError, ServerResult};
pub use state::AppState;

use shelf_catalog::{seed_sample_data, CatalogStore};
use shelf_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Open the catalog, seed it when empty and serve until `shutdown` fires.
pub async fn serve(config: &AppConfig, shutdown: CancellationToken) -> AppResult<()> {
    config.ensure_shelf_dir()?;
    let store = Arc::new(CatalogStore::open(&config.database_path())?);
    seed_sample_data(&store)?;

    let state = Arc::new(AppState::from_config(config, store)?.with_shutdown(shutdown.clone()));
    tracing::info!("Chat service: {}", state.chat.name());
    let app = create_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(addr.as_str()).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Other(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}
