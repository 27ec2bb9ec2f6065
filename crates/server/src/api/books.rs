//! Book CRUD endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use shelf_catalog::{Book, BookQuery};

use super::blocking;
use crate::error::{bad_request, not_found, ServerResult};
use crate::state::AppState;

pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookQuery>,
) -> ServerResult<Json<Vec<Book>>> {
    let books = blocking(move || Ok(state.store.list_books(&query)?)).await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Book>> {
    let book = blocking(move || Ok(state.store.get_book(id)?))
        .await?
        .ok_or_else(|| not_found("Book", id))?;
    Ok(Json(book))
}

pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(input): Json<Book>,
) -> ServerResult<impl IntoResponse> {
    let store = state.store.clone();
    let book = blocking(move || Ok(store.create_book(&input)?)).await?;
    state.records_changed();
    tracing::info!("Created book {}", book.id);

    let location = format!("/api/books/{}", book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<Book>,
) -> ServerResult<Json<Book>> {
    if input.id != id {
        return Err(bad_request("ID mismatch"));
    }

    let store = state.store.clone();
    let book = blocking(move || Ok(store.update_book(id, &input)?)).await?;
    state.records_changed();
    tracing::info!("Updated book {}", id);
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode> {
    let store = state.store.clone();
    blocking(move || Ok(store.delete_book(id)?)).await?;
    state.records_changed();
    tracing::info!("Deleted book {}", id);
    Ok(StatusCode::NO_CONTENT)
}
