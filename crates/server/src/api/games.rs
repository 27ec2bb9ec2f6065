//! Read-only game endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shelf_catalog::{GameQuery, GameView, Page};

use super::blocking;
use crate::error::{not_found, ServerResult};
use crate::state::AppState;

pub async fn list_games(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GameQuery>,
) -> ServerResult<Json<Page<GameView>>> {
    let page = blocking(move || Ok(state.store.list_games(&query)?)).await?;
    Ok(Json(page.map(GameView::from)))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ServerResult<Json<GameView>> {
    let game = blocking(move || Ok(state.store.get_game(id)?))
        .await?
        .ok_or_else(|| not_found("Game", id))?;
    Ok(Json(GameView::from(game)))
}

pub async fn list_genres(State(state): State<Arc<AppState>>) -> ServerResult<Json<Vec<String>>> {
    let genres = blocking(move || Ok(state.store.genres()?)).await?;
    Ok(Json(genres))
}

pub async fn list_developers(
    State(state): State<Arc<AppState>>,
) -> ServerResult<Json<Vec<String>>> {
    let developers = blocking(move || Ok(state.store.developers()?)).await?;
    Ok(Json(developers))
}
