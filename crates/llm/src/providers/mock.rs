//! Scripted LLM client for tests and offline demos.
//!
//! Returns a fixed reply (or a fixed failure) and records every request it
//! receives so callers can inspect what was sent.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use shelf_core::{AppError, AppResult};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted LLM client.
pub struct MockLlmClient {
    outcome: Result<String, String>,
    delay: Option<Duration>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    /// Always answer with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            outcome: Ok(reply.into()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with a generation error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            Ok(reply) => Ok(LlmResponse {
                content: reply.clone(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            }),
            Err(message) => Err(AppError::Llm(message.clone())),
        }
    }
}
