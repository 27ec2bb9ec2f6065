//! LLM provider factory.
//!
//! Builds a generative client from a provider name plus the resolved
//! endpoint, secret and timeout.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client based on the provider name.
///
/// # Errors
/// Returns error if:
/// - Provider is unknown
/// - Provider has no generative backend (`simple`)
/// - Required secrets are missing
/// - Client initialization fails
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout: Option<u64>,
) -> Result<Arc<dyn LlmClient>, String> {
    let provider_type =
        ProviderType::parse(provider).ok_or_else(|| format!("Unknown provider: {}", provider))?;

    match provider_type {
        ProviderType::Ollama => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            let mut client = OllamaClient::with_base_url(base_url);
            if let Some(secs) = timeout {
                client = client
                    .with_timeout(Duration::from_secs(secs))
                    .map_err(|e| e.to_string())?;
            }
            Ok(Arc::new(client))
        }
        ProviderType::OpenAI => {
            let key = api_key
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| "OpenAI provider requires API key".to_string())?;
            let mut client = match endpoint {
                Some(base) => OpenAiClient::with_base_url(base, key),
                None => OpenAiClient::new(key),
            };
            if let Some(secs) = timeout {
                client = client
                    .with_timeout(Duration::from_secs(secs))
                    .map_err(|e| e.to_string())?;
            }
            Ok(Arc::new(client))
        }
        ProviderType::Simple => {
            Err("Provider 'simple' has no generative backend".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client("ollama", None, None, None).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_create_ollama_with_custom_endpoint_and_timeout() {
        let client = create_client("ollama", Some("http://localhost:8080"), None, Some(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_openai_requires_api_key() {
        match create_client("openai", None, None, None) {
            Err(err) => assert!(err.contains("OpenAI provider requires API key")),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
        assert!(create_client("openai", None, Some("  "), None).is_err());
    }

    #[test]
    fn test_create_openai_client() {
        let client = create_client("openai", None, Some("sk-test"), Some(30)).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_simple_has_no_client() {
        match create_client("simple", None, None, None) {
            Err(err) => assert!(err.contains("no generative backend")),
            Ok(_) => panic!("Expected error for simple provider"),
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, None, None) {
            Err(err) => assert!(err.contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
