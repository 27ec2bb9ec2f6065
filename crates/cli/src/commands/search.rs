//! Search command handler.

use super::{open_store, print_json};
use clap::Args;
use shelf_catalog::{BookSearch, GameSearch, RecordLookup};
use shelf_core::{config::AppConfig, AppError, AppResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Ranked search over books or games
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Free-text query
    pub query: String,

    /// Search games instead of books
    #[arg(long)]
    pub games: bool,

    /// Maximum results
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub fn execute(&self, config: &AppConfig, cancel: &CancellationToken) -> AppResult<()> {
        if self.query.trim().is_empty() {
            return Err(AppError::Validation("Query is required".to_string()));
        }

        let lookup: Arc<dyn RecordLookup> = open_store(config)?;

        if self.games {
            let results = GameSearch::new(lookup)
                .with_limit(self.limit)
                .search(&self.query, cancel)?;
            if self.json {
                return print_json(&results);
            }
            if results.is_empty() {
                println!("No games matched '{}'", self.query);
            }
            for hit in &results {
                println!(
                    "{:>6.2}  #{} {} ({})",
                    hit.score, hit.record.id, hit.record.title, hit.record.developer
                );
                if let Some(ref reason) = hit.reason {
                    println!("        {}", reason);
                }
            }
        } else {
            let results = BookSearch::new(lookup)
                .with_limit(self.limit)
                .search(&self.query, cancel)?;
            if self.json {
                return print_json(&results);
            }
            if results.is_empty() {
                println!("No books matched '{}'", self.query);
            }
            for hit in &results {
                println!(
                    "{:>6.2}  #{} {} by {}",
                    hit.score, hit.record.id, hit.record.title, hit.record.author
                );
                if let Some(ref reason) = hit.reason {
                    println!("        {}", reason);
                }
            }
        }

        Ok(())
    }
}
