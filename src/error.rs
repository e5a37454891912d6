//! Error types for SS Móveis
//!
//! This module defines the crate-wide error type, using `thiserror` for
//! ergonomic error handling. Domain outcomes that are shown to the user
//! inline (authentication failures, terminal command mistakes) have their
//! own small enums next to the code that produces them.

use thiserror::Error;

/// Main error type for SS Móveis operations
///
/// Covers configuration loading, text-generation provider calls and the
/// I/O performed by the terminal front-end.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, unexpected status, bad payloads)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Invalid command-line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for SS Móveis operations
///
/// Uses `anyhow::Error` so callers can attach context while the variants
/// above stay matchable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
