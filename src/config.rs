//! Configuration management for SS Móveis
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{InventoryError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
///
/// Holds the text-generation provider settings, the simulated
/// authentication behavior and the catalog startup options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Text generation configuration (Gemini, Ollama)
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Authentication behavior
    #[serde(default)]
    pub auth: AuthConfig,
    /// Catalog startup options
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Text generation configuration
///
/// Specifies which provider writes item descriptions and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider to use ("gemini" or "ollama")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Google Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Request timeout for a single generation call (seconds)
    #[serde(default = "default_generation_timeout")]
    pub timeout_seconds: u64,

    /// Upper bound on description length requested from the model
    #[serde(default = "default_max_description_chars")]
    pub max_description_chars: usize,
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_generation_timeout() -> u64 {
    30
}

fn default_max_description_chars() -> usize {
    300
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
            timeout_seconds: default_generation_timeout(),
            max_description_chars: default_max_description_chars(),
        }
    }
}

/// Google Gemini provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for Gemini
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// API key; normally supplied through `GEMINI_API_KEY` or `API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            api_key: None,
        }
    }
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// Simulated authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Artificial delay applied to every login/register submit (milliseconds)
    #[serde(default = "default_auth_delay_ms")]
    pub delay_ms: u64,

    /// Minimum accepted password length, in characters
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

fn default_auth_delay_ms() -> u64 {
    1000
}

fn default_min_password_len() -> usize {
    6
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_auth_delay_ms(),
            min_password_len: default_min_password_len(),
        }
    }
}

/// Catalog startup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Seed the catalog with the two sample entries at startup
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

fn default_seed_samples() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_samples: default_seed_samples(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(InventoryError::Io)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(InventoryError::Yaml)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider) = std::env::var("SSMOVEIS_PROVIDER") {
            self.generation.provider = provider;
        }

        if let Ok(model) = std::env::var("SSMOVEIS_GEMINI_MODEL") {
            self.generation.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("SSMOVEIS_GEMINI_API_BASE") {
            self.generation.gemini.api_base = api_base;
        }

        // GEMINI_API_KEY wins over the generic API_KEY
        if let Some(key) = std::env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
        {
            self.generation.gemini.api_key = Some(key);
        }

        if let Ok(host) = std::env::var("SSMOVEIS_OLLAMA_HOST") {
            self.generation.ollama.host = host;
        }

        if let Ok(model) = std::env::var("SSMOVEIS_OLLAMA_MODEL") {
            self.generation.ollama.model = model;
        }

        if let Ok(delay) = std::env::var("SSMOVEIS_AUTH_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(value) => {
                    self.auth.delay_ms = value;
                    tracing::debug!(delay_ms = value, "Env override: SSMOVEIS_AUTH_DELAY_MS");
                }
                Err(_) => {
                    tracing::warn!("Invalid SSMOVEIS_AUTH_DELAY_MS: {}", delay);
                }
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(provider) = &cli.provider {
            self.generation.provider = provider.clone();
        }

        if cli.no_samples {
            self.catalog.seed_samples = false;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let valid_providers = ["gemini", "ollama"];
        if !valid_providers.contains(&self.generation.provider.as_str()) {
            return Err(InventoryError::Config(format!(
                "Invalid provider: {}. Must be one of: {}",
                self.generation.provider,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.generation.timeout_seconds == 0 {
            return Err(InventoryError::Config(
                "generation.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.generation.max_description_chars == 0 {
            return Err(InventoryError::Config(
                "generation.max_description_chars must be greater than 0".to_string(),
            )
            .into());
        }

        if self.auth.min_password_len == 0 {
            return Err(InventoryError::Config(
                "auth.min_password_len must be at least 1".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
