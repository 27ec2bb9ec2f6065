//! Serve command handler.

use clap::Args;
use shelf_core::{config::AppConfig, AppResult};
use tokio_util::sync::CancellationToken;

/// Run the HTTP API
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Bind address (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig, cancel: CancellationToken) -> AppResult<()> {
        let mut config = config.clone();
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        config.validate()?;

        tracing::info!("Starting catalog API on {}:{}", config.server.host, config.server.port);
        shelf_server::serve(&config, cancel).await
    }
}
