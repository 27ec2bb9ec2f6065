//! Search services over a record lookup.

use super::ranker::{rank, ScoredResult, DEFAULT_RESULT_LIMIT};
use super::scorer::FieldWeights;
use crate::cancel::ensure_active;
use crate::lookup::RecordLookup;
use crate::models::{Book, Game};
use shelf_core::AppResult;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Ranked book search.
#[derive(Clone)]
pub struct BookSearch {
    lookup: Arc<dyn RecordLookup>,
    limit: usize,
}

impl BookSearch {
    pub fn new(lookup: Arc<dyn RecordLookup>) -> Self {
        Self {
            lookup,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ScoredResult<Book>>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        ensure_active(cancel)?;

        let candidates = self.lookup.books()?;
        let total = candidates.len();
        let results = rank(candidates, query, self.limit, &FieldWeights::DEFAULT);

        tracing::info!(
            "Book search '{}' matched {} of {} records",
            query,
            results.len(),
            total
        );
        Ok(results)
    }
}

/// Ranked game search.
#[derive(Clone)]
pub struct GameSearch {
    lookup: Arc<dyn RecordLookup>,
    limit: usize,
}

impl GameSearch {
    pub fn new(lookup: Arc<dyn RecordLookup>) -> Self {
        Self {
            lookup,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ScoredResult<Game>>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        ensure_active(cancel)?;

        let candidates = self.lookup.games()?;
        let total = candidates.len();
        let results = rank(candidates, query, self.limit, &FieldWeights::DEFAULT);

        tracing::info!(
            "Game search '{}' matched {} of {} records",
            query,
            results.len(),
            total
        );
        Ok(results)
    }
}
