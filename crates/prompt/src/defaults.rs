//! Built-in prompt definitions.

use crate::types::PromptDefinition;
use shelf_core::{AppError, AppResult};

/// Identifier of the built-in catalog assistant prompt.
pub const DEFAULT_PROMPT_ID: &str = "assistant.chat.default";

const DEFAULT_PROMPT_YAML: &str = r#"
id: assistant.chat.default
title: Catalog assistant
apiVersion: "1.0"
createdBy: shelf
behavior:
  tone: friendly
  style: concise
context:
  includeCatalog: true
template: |-
  You are a helpful book recommendation assistant. You have access to a catalog of books.
  Your role is to:
  1. Help users find books based on their preferences
  2. Provide book recommendations
  3. Answer questions about books in the catalog
  4. Be conversational and {{tone}}

  Here is the current book catalog:
  {{catalog}}

  When recommending books, reference them by their ID numbers. Keep responses {{style}} but informative.
  If users ask about books not in the catalog, politely explain what's available instead.
output:
  format: markdown
"#;

/// Parse the built-in assistant prompt.
pub fn default_prompt() -> AppResult<PromptDefinition> {
    serde_yaml::from_str(DEFAULT_PROMPT_YAML)
        .map_err(|e| AppError::Prompt(format!("Built-in prompt is invalid: {}", e)))
}
