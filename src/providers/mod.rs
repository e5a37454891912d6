//! Provider module for SS Móveis
//!
//! This module contains the text generation provider abstraction and its
//! implementations for Google Gemini and Ollama.

pub mod base;
pub mod gemini;
pub mod ollama;

pub use base::Provider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

use crate::config::GenerationConfig;
use crate::error::{InventoryError, Result};
use std::time::Duration;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Generation configuration; `config.provider` selects the backend
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
///
/// # Examples
///
/// ```
/// use ssmoveis::config::GenerationConfig;
/// use ssmoveis::providers::create_provider;
///
/// let mut config = GenerationConfig::default();
/// config.provider = "ollama".to_string();
/// let provider = create_provider(&config).unwrap();
/// assert_eq!(provider.name(), "ollama");
/// ```
pub fn create_provider(config: &GenerationConfig) -> Result<Box<dyn Provider>> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    match config.provider.as_str() {
        "gemini" => Ok(Box::new(GeminiProvider::new(config.gemini.clone(), timeout)?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(config.ollama.clone(), timeout)?)),
        other => Err(InventoryError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
