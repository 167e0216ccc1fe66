//! Error types for the search query sanitizer.
//!
//! The sanitizer and the query encoder are total and never produce these
//! errors. They surface from configuration loading and response decoding.

use thiserror::Error;

/// Domain-specific errors for search request preparation.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Get a user-friendly suggestion for how to fix this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => Some("Check your environment variables and configuration"),
            Self::Decode(_) => Some("Check that the product API returned a JSON array of products"),
            Self::InvalidInput(_) => None,
        }
    }
}
