//! Read-side view of the catalog used by search and chat.

use crate::models::{Book, Game};
use crate::store::CatalogStore;
use moka::sync::Cache;
use shelf_core::AppResult;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Capability the search and chat services read records through.
pub trait RecordLookup: Send + Sync {
    /// Every book, in store order.
    fn books(&self) -> AppResult<Vec<Book>>;

    /// Every game, in store order.
    fn games(&self) -> AppResult<Vec<Game>>;

    /// Up to `limit` books with any keyword in title, author, genre or description.
    fn books_matching_any(&self, keywords: &[String], limit: usize) -> AppResult<Vec<Book>>;

    /// Ids used to validate citations.
    fn book_ids(&self) -> AppResult<HashSet<i64>>;
}

impl RecordLookup for CatalogStore {
    fn books(&self) -> AppResult<Vec<Book>> {
        self.all_books()
    }

    fn games(&self) -> AppResult<Vec<Game>> {
        self.all_games()
    }

    fn books_matching_any(&self, keywords: &[String], limit: usize) -> AppResult<Vec<Book>> {
        CatalogStore::books_matching_any(self, keywords, limit)
    }

    fn book_ids(&self) -> AppResult<HashSet<i64>> {
        CatalogStore::book_ids(self)
    }
}

impl<L: RecordLookup + ?Sized> RecordLookup for Arc<L> {
    fn books(&self) -> AppResult<Vec<Book>> {
        (**self).books()
    }

    fn games(&self) -> AppResult<Vec<Game>> {
        (**self).games()
    }

    fn books_matching_any(&self, keywords: &[String], limit: usize) -> AppResult<Vec<Book>> {
        (**self).books_matching_any(keywords, limit)
    }

    fn book_ids(&self) -> AppResult<HashSet<i64>> {
        (**self).book_ids()
    }
}

#[derive(Clone)]
enum Cached {
    Books(Arc<Vec<Book>>),
    Games(Arc<Vec<Game>>),
    Ids(Arc<HashSet<i64>>),
}

/// Memoizing decorator in front of any lookup.
///
/// Entries live for the configured TTL or until [`CachedLookup::invalidate_all`].
/// Call `invalidate_all` after every write to the underlying store.
pub struct CachedLookup<L> {
    inner: L,
    cache: Cache<String, Cached>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<L: RecordLookup> CachedLookup<L> {
    pub fn new(inner: L, ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The wrapped lookup.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        tracing::debug!("Lookup cache invalidated");
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    fn get_or_load(
        &self,
        key: String,
        load: impl FnOnce() -> AppResult<Cached>,
    ) -> AppResult<Cached> {
        if let Some(hit) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = load()?;
        self.cache.insert(key, value.clone());
        Ok(value)
    }
}

impl<L: RecordLookup> RecordLookup for CachedLookup<L> {
    fn books(&self) -> AppResult<Vec<Book>> {
        match self.get_or_load("books".to_string(), || {
            Ok(Cached::Books(Arc::new(self.inner.books()?)))
        })? {
            Cached::Books(books) => Ok(books.as_ref().clone()),
            _ => self.inner.books(),
        }
    }

    fn games(&self) -> AppResult<Vec<Game>> {
        match self.get_or_load("games".to_string(), || {
            Ok(Cached::Games(Arc::new(self.inner.games()?)))
        })? {
            Cached::Games(games) => Ok(games.as_ref().clone()),
            _ => self.inner.games(),
        }
    }

    fn books_matching_any(&self, keywords: &[String], limit: usize) -> AppResult<Vec<Book>> {
        let key = format!("match:{}:{}", limit, keywords.join("\u{1f}"));
        match self.get_or_load(key, || {
            Ok(Cached::Books(Arc::new(
                self.inner.books_matching_any(keywords, limit)?,
            )))
        })? {
            Cached::Books(books) => Ok(books.as_ref().clone()),
            _ => self.inner.books_matching_any(keywords, limit),
        }
    }

    fn book_ids(&self) -> AppResult<HashSet<i64>> {
        match self.get_or_load("book_ids".to_string(), || {
            Ok(Cached::Ids(Arc::new(self.inner.book_ids()?)))
        })? {
            Cached::Ids(ids) => Ok(ids.as_ref().clone()),
            _ => self.inner.book_ids(),
        }
    }
}
