//! Conversational assistant over the book catalog.

pub mod citations;
pub mod responder;
pub mod service;

pub use citations::extract_ids;
pub use responder::{extract_keywords, respond, ChatReply, HELP_MESSAGE, MAX_SUGGESTIONS};
pub use service::{
    build_chat_service, ChatResponse, ChatService, KeywordChatService, LlmChatService,
};
