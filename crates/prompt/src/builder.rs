//! Prompt builder for rendering templates and injecting catalog context.

use crate::types::{BuiltPrompt, PromptDefinition};
use handlebars::Handlebars;
use shelf_core::{AppError, AppResult};
use std::collections::HashMap;

/// Build a system prompt from a definition and input variables.
///
/// `tone` and `style` from the definition's behavior are always available
/// to the template. When the definition asks for the catalog and one is
/// supplied it is injected as `catalog`.
///
/// # Example
/// ```no_run
/// use shelf_prompt::{build_prompt, default_prompt};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let def = default_prompt()?;
/// let built = build_prompt(&def, HashMap::new(), Some("[]".to_string()))?;
/// println!("{}", built.system);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    mut variables: HashMap<String, String>,
    catalog: Option<String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    variables
        .entry("tone".to_string())
        .or_insert_with(|| definition.behavior.tone.clone());
    variables
        .entry("style".to_string())
        .or_insert_with(|| definition.behavior.style.clone());

    let catalog_included = if definition.context.include_catalog {
        match catalog {
            Some(json) => {
                variables.insert("catalog".to_string(), json);
                true
            }
            None => {
                tracing::warn!("Catalog context requested but not provided");
                false
            }
        }
    } else {
        false
    };

    let system = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt::new(
        system,
        definition.id.clone(),
        catalog_included,
        &variables,
    ))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Catalog JSON must reach the model unescaped
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_prompt;
    use crate::types::{PromptBehavior, PromptContextConfig, PromptOutputSpec};

    fn definition(template: &str, include_catalog: bool) -> PromptDefinition {
        PromptDefinition {
            id: "test.prompt".to_string(),
            title: "Test".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            behavior: PromptBehavior::default(),
            context: PromptContextConfig { include_catalog },
            template: template.to_string(),
            output: PromptOutputSpec::default(),
        }
    }

    #[test]
    fn test_render_simple_template() {
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Shelf".to_string());

        let result = render_template("Hello {{name}}", &vars).unwrap();
        assert_eq!(result, "Hello Shelf");
    }

    #[test]
    fn test_catalog_injected_unescaped() {
        let def = definition("Catalog: {{catalog}}", true);
        let catalog = r#"[{"Id":1,"Title":"Clean Code & More"}]"#.to_string();

        let built = build_prompt(&def, HashMap::new(), Some(catalog.clone())).unwrap();
        assert_eq!(built.system, format!("Catalog: {}", catalog));
        assert!(built.metadata.catalog_included);
    }

    #[test]
    fn test_catalog_ignored_when_disabled() {
        let def = definition("Catalog: {{catalog}}", false);

        let built = build_prompt(&def, HashMap::new(), Some("[]".to_string())).unwrap();
        assert_eq!(built.system, "Catalog: ");
        assert!(!built.metadata.catalog_included);
    }

    #[test]
    fn test_behavior_variables_available() {
        let def = definition("Be {{tone}} and {{style}}.", false);
        let built = build_prompt(&def, HashMap::new(), None).unwrap();
        assert_eq!(built.system, "Be friendly and concise.");
    }

    #[test]
    fn test_default_prompt_renders_catalog() {
        let def = default_prompt().unwrap();
        let built = build_prompt(&def, HashMap::new(), Some("[CATALOG]".to_string())).unwrap();
        assert!(built.system.contains("[CATALOG]"));
        assert!(built.system.starts_with("You are a helpful book recommendation assistant."));
        assert!(built.system.contains("Be conversational and friendly"));
    }

    #[test]
    fn test_invalid_template_is_prompt_error() {
        let def = definition("{{#if}}", false);
        let err = build_prompt(&def, HashMap::new(), None).unwrap_err();
        assert!(matches!(err, AppError::Prompt(_)));
    }
}
