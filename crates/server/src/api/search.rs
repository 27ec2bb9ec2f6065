//! Ranked search endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shelf_catalog::{Book, Game, GameView, ScoredResult};

use super::{blocking, request_token};
use crate::error::{bad_request, ServerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct BookHit {
    pub book: Book,
    pub score: f64,
    pub reason: Option<String>,
}

impl From<ScoredResult<Book>> for BookHit {
    fn from(result: ScoredResult<Book>) -> Self {
        Self {
            book: result.record,
            score: result.score,
            reason: result.reason,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameHit {
    pub game: GameView,
    pub score: f64,
    pub reason: Option<String>,
}

impl From<ScoredResult<Game>> for GameHit {
    fn from(result: ScoredResult<Game>) -> Self {
        Self {
            game: GameView::from(result.record),
            score: result.score,
            reason: result.reason,
        }
    }
}

fn require_query(request: &SearchRequest) -> ServerResult<String> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(bad_request("Query is required"));
    }
    Ok(query.to_string())
}

pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> ServerResult<Json<Vec<BookHit>>> {
    let query = require_query(&request)?;
    let (cancel, _guard) = request_token(&state);

    let results = blocking(move || Ok(state.book_search.search(&query, &cancel)?)).await?;
    Ok(Json(results.into_iter().map(BookHit::from).collect()))
}

pub async fn search_games(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> ServerResult<Json<Vec<GameHit>>> {
    let query = require_query(&request)?;
    let (cancel, _guard) = request_token(&state);

    let results = blocking(move || Ok(state.game_search.search(&query, &cancel)?)).await?;
    Ok(Json(results.into_iter().map(GameHit::from).collect()))
}
