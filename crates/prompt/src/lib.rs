//! Prompt system for the Shelf assistant.
//!
//! This crate provides structured prompt management with:
//! - YAML-based prompt definitions, overridable per workspace
//! - A built-in catalog assistant prompt
//! - Handlebars template rendering with catalog context injection

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use defaults::{default_prompt, DEFAULT_PROMPT_ID};
pub use loader::{load_prompt, load_prompt_or_default};
pub use types::{
    BuiltPrompt, BuiltPromptMetadata, PromptBehavior, PromptContextConfig, PromptDefinition,
    PromptOutputSpec,
};
