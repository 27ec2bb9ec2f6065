//! HTTP routes for the catalog API

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tokio_util::sync::{CancellationToken, DropGuard};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

pub mod books;
pub mod chat;
pub mod games;
pub mod search;

/// Build the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        // Ranked search
        .route("/ai/search", post(search::search_books))
        .route("/games/search", post(search::search_games))
        // Book endpoints
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Game endpoints
        .route("/games", get(games::list_games))
        .route("/games/genres", get(games::list_genres))
        .route("/games/developers", get(games::list_developers))
        .route("/games/{id}", get(games::get_game))
        // Chat endpoints
        .route("/chat", post(chat::chat))
        .route("/chat/health", get(chat::health))
        .with_state(state);

    Router::new().nest("/api", api_router)
}

/// The router with CORS and request tracing applied.
pub fn create_app(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .settings
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Per-request token: cancelled on server shutdown, and when the handler is dropped.
///
/// The guard also cancels work the handler handed off, such as a blocking store read.
pub(crate) fn request_token(state: &AppState) -> (CancellationToken, DropGuard) {
    let token = state.shutdown.child_token();
    let guard = token.clone().drop_guard();
    (token, guard)
}

/// Run a synchronous store call on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(format!("Blocking task failed: {}", e)))?
}
