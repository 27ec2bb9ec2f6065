//! Application state management

use shelf_catalog::chat::KeywordChatService;
use shelf_catalog::{
    build_chat_service, BookSearch, CachedLookup, CatalogStore, ChatService, GameSearch,
    RecordLookup,
};
use shelf_core::config::{CacheSettings, ServerSettings};
use shelf_core::{AppConfig, AppResult};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Application state shared across all handlers
pub struct AppState {
    /// Record store; every write goes through here
    pub store: Arc<CatalogStore>,

    /// Cached read side used by search and chat
    pub lookup: Arc<CachedLookup<Arc<CatalogStore>>>,

    pub book_search: BookSearch,
    pub game_search: GameSearch,

    /// Chat backend chosen at startup
    pub chat: Arc<dyn ChatService>,

    pub settings: ServerSettings,

    /// Fires on server shutdown; every request token is a child of it
    pub shutdown: CancellationToken,
}

impl AppState {
    /// State with the keyword chat responder.
    pub fn new(store: Arc<CatalogStore>, cache: &CacheSettings) -> Self {
        let lookup = Arc::new(cached_lookup(store.clone(), cache));
        let reader: Arc<dyn RecordLookup> = lookup.clone();

        Self {
            store,
            book_search: BookSearch::new(reader.clone()),
            game_search: GameSearch::new(reader.clone()),
            chat: Arc::new(KeywordChatService::new(reader)),
            lookup,
            settings: ServerSettings::default(),
            shutdown: CancellationToken::new(),
        }
    }

    /// State with the chat backend selected by `config`.
    pub fn from_config(config: &AppConfig, store: Arc<CatalogStore>) -> AppResult<Self> {
        let mut state = Self::new(store, &config.cache);
        state.chat = build_chat_service(config, state.reader())?;
        state.settings = config.server.clone();
        Ok(state)
    }

    /// Replace the chat backend.
    pub fn with_chat_service(mut self, chat: Arc<dyn ChatService>) -> Self {
        self.chat = chat;
        self
    }

    /// Tie in-flight requests to `shutdown`.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Read handle for building services over the cached lookup.
    pub fn reader(&self) -> Arc<dyn RecordLookup> {
        self.lookup.clone()
    }

    /// Drop cached reads after a write.
    pub fn records_changed(&self) {
        self.lookup.invalidate_all();
    }
}

fn cached_lookup(
    store: Arc<CatalogStore>,
    cache: &CacheSettings,
) -> CachedLookup<Arc<CatalogStore>> {
    // A zero TTL keeps nothing
    let max_entries = if cache.ttl_secs == 0 {
        0
    } else {
        cache.max_entries
    };
    CachedLookup::new(store, Duration::from_secs(cache.ttl_secs), max_entries)
}
