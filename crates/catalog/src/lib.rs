//! Book and game catalog.
//!
//! Storage, relevance search and the chat assistant that recommends books.

pub mod cancel;
pub mod chat;
pub mod lookup;
pub mod models;
pub mod search;
pub mod seed;
pub mod store;


// Re-export commonly used types
pub use chat::{build_chat_service, ChatResponse, ChatService};
pub use lookup::{CachedLookup, RecordLookup};
pub use models::{Book, Game, GameView, Page};
pub use search::{BookSearch, GameSearch, ScoredResult};
pub use seed::{seed_sample_data, SeedStats};
pub use store::{BookQuery, CatalogStore, GameQuery};
