//! Chat assistant endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shelf_catalog::ChatResponse;
use shelf_core::AppError;
use shelf_llm::ChatMessage;

use super::request_token;
use crate::error::{bad_request, ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> ServerResult<Json<ChatResponse>> {
    if request.messages.is_empty() {
        return Err(bad_request("Messages are required"));
    }

    let (cancel, _guard) = request_token(&state);
    match state.chat.chat(&request.messages, &cancel).await {
        Ok(response) => Ok(Json(response)),
        Err(AppError::Cancelled) => Err(ServerError::Cancelled),
        Err(e) => {
            tracing::error!("Error processing chat request: {}", e);
            Err(ServerError::ChatFailed)
        }
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.chat.name().to_string(),
    })
}
