//! Prompt definition and rendering result types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A prompt definition loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// Behavioral settings
    #[serde(default)]
    pub behavior: PromptBehavior,

    /// Context injection settings
    #[serde(default)]
    pub context: PromptContextConfig,

    /// System prompt template with Handlebars syntax
    pub template: String,

    /// Output specification
    #[serde(default)]
    pub output: PromptOutputSpec,
}

/// Behavioral settings, exposed to the template as `tone` and `style`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptBehavior {
    pub tone: String,
    pub style: String,
}

impl Default for PromptBehavior {
    fn default() -> Self {
        Self {
            tone: "friendly".to_string(),
            style: "concise".to_string(),
        }
    }
}

/// Context injection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptContextConfig {
    /// Inject the serialized book catalog as `{{catalog}}`
    #[serde(rename = "includeCatalog", default = "default_true")]
    pub include_catalog: bool,
}

impl Default for PromptContextConfig {
    fn default() -> Self {
        Self {
            include_catalog: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Output specification for the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptOutputSpec {
    /// Output format (e.g., "text", "markdown")
    pub format: String,
}

impl Default for PromptOutputSpec {
    fn default() -> Self {
        Self {
            format: "markdown".to_string(),
        }
    }
}

/// A rendered system prompt ready to be sent ahead of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message
    pub system: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Whether the catalog was injected
    #[serde(rename = "catalogIncluded")]
    pub catalog_included: bool,

    /// Names of the template variables that were provided
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: Vec<String>,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(
        system: String,
        source_prompt_id: String,
        catalog_included: bool,
        variables: &HashMap<String, String>,
    ) -> Self {
        let mut resolved_variables: Vec<String> = variables.keys().cloned().collect();
        resolved_variables.sort();

        Self {
            system,
            metadata: BuiltPromptMetadata {
                source_prompt_id,
                catalog_included,
                resolved_variables,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: assistant.chat.terse
title: Terse assistant
apiVersion: "1.0"
createdBy: test
behavior:
  tone: neutral
  style: terse
context:
  includeCatalog: false
template: "You recommend books."
output:
  format: text
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "assistant.chat.terse");
        assert_eq!(def.behavior.style, "terse");
        assert!(!def.context.include_catalog);
        assert_eq!(def.output.format, "text");
    }

    #[test]
    fn test_optional_sections_default() {
        let yaml = r#"
id: minimal
title: Minimal
apiVersion: "1.0"
template: "{{catalog}}"
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert!(def.context.include_catalog);
        assert_eq!(def.behavior.tone, "friendly");
        assert_eq!(def.output.format, "markdown");
    }

    #[test]
    fn test_built_prompt_sorts_variable_names() {
        let mut vars = HashMap::new();
        vars.insert("tone".to_string(), "x".to_string());
        vars.insert("catalog".to_string(), "[]".to_string());

        let built = BuiltPrompt::new("sys".to_string(), "p".to_string(), true, &vars);
        assert_eq!(built.metadata.resolved_variables, vec!["catalog", "tone"]);
        assert!(built.metadata.catalog_included);
    }
}
