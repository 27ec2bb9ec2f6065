//! Command handlers for the shelf CLI.

pub mod books;
pub mod chat;
pub mod games;
pub mod search;
pub mod seed;
pub mod serve;

pub use books::BooksCommand;
pub use chat::ChatCommand;
pub use games::GamesCommand;
pub use search::SearchCommand;
pub use seed::SeedCommand;
pub use serve::ServeCommand;

use shelf_catalog::CatalogStore;
use shelf_core::{config::AppConfig, AppResult};
use std::sync::Arc;

/// Open the configured catalog database.
pub(crate) fn open_store(config: &AppConfig) -> AppResult<Arc<CatalogStore>> {
    let path = config.database_path();
    tracing::debug!("Opening catalog at {:?}", path);
    Ok(Arc::new(CatalogStore::open(&path)?))
}

/// Print `value` as pretty JSON.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
