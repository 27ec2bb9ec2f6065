//! Chat command handler.

use super::{open_store, print_json};
use clap::Args;
use shelf_catalog::{build_chat_service, RecordLookup};
use shelf_core::{config::AppConfig, AppResult};
use shelf_llm::ChatMessage;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Ask the catalog assistant
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Your message
    pub message: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig, cancel: &CancellationToken) -> AppResult<()> {
        config.validate()?;

        let lookup: Arc<dyn RecordLookup> = open_store(config)?;
        let service = build_chat_service(config, lookup)?;
        tracing::info!("Chatting via {}", service.name());

        let response = service
            .chat(&[ChatMessage::user(self.message.clone())], cancel)
            .await?;

        if self.json {
            return print_json(&response);
        }

        println!("{}", response.message);
        if let Some(ref ids) = response.recommended_book_ids {
            let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            eprintln!("Recommended book ids: {}", ids.join(", "));
        }
        Ok(())
    }
}
