//! LLM integration crate for Shelf.
//!
//! This crate provides a provider-agnostic abstraction for chat completions.
//! The catalog assistant only ever sees the `LlmClient` trait; the concrete
//! provider is chosen once at startup through [`create_client`].
//!
//! # Providers
//! - **OpenAI**: hosted chat completions
//! - **Ollama**: local LLM runtime
//! - **Mock**: scripted replies for tests
//!
//! # Example
//! ```no_run
//! use shelf_llm::{ChatMessage, LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new(vec![ChatMessage::user("Hello!")], "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{ChatMessage, ChatRole, LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{MockLlmClient, OllamaClient, OpenAiClient};
pub use types::ProviderType;
