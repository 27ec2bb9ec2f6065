//! Error types for Shelf.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, generation, catalog storage,
//! validation, prompt rendering and cancellation.

use thiserror::Error;

/// Unified error type for Shelf.
///
/// All fallible functions return `Result<T, AppError>`.
/// Library code never panics on user input; errors are represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation failed in the LLM backend
    #[error("Generation failed: {0}")]
    Llm(String),

    /// Record store errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected by validation rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error came from the generative backend.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, AppError::Llm(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
