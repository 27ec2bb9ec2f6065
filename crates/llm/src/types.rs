//! Provider identifiers.

/// Chat backend kinds understood by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Keyword matching only, no generative backend.
    Simple,
    OpenAI,
    Ollama,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "none" => Some(Self::Simple),
            "openai" => Some(Self::OpenAI),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::OpenAI => "openai",
            Self::Ollama => "ollama",
        }
    }

    /// Whether this provider needs a generative client.
    pub fn is_generative(&self) -> bool {
        !matches!(self, Self::Simple)
    }
}
