//! Item description generation
//!
//! [`DescriptionClient`] is the single boundary between the console and the
//! external text generation service. It never returns an error: failures and
//! empty answers are replaced by fixed fallback strings so the add-item form
//! always receives something to show.

use std::sync::Arc;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::prompts::generate_description_prompt;
use crate::providers::{create_provider, Provider};

/// Text used when the provider call fails
pub const FALLBACK_CONNECTION_ERROR: &str = "Erro ao conectar com a IA. Tente novamente.";

/// Text used when the provider answers without any text
pub const FALLBACK_EMPTY_RESPONSE: &str = "Não foi possível gerar a descrição.";

/// Writes marketing descriptions for catalog items
///
/// Cheap to clone; clones share the underlying provider.
#[derive(Clone)]
pub struct DescriptionClient {
    provider: Arc<dyn Provider>,
    max_chars: usize,
}

impl DescriptionClient {
    /// Wrap an existing provider
    pub fn new(provider: Arc<dyn Provider>, max_chars: usize) -> Self {
        Self {
            provider,
            max_chars,
        }
    }

    /// Build the configured provider and wrap it
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be constructed
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let provider: Arc<dyn Provider> = Arc::from(create_provider(config)?);
        Ok(Self::new(provider, config.max_description_chars))
    }

    /// Name of the backing provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Generate a description for an item
    ///
    /// The caller is responsible for making sure `name` and `category` are
    /// not empty. The result is the trimmed model output, or one of
    /// [`FALLBACK_CONNECTION_ERROR`] / [`FALLBACK_EMPTY_RESPONSE`].
    pub async fn generate_description(&self, name: &str, category: &str, keywords: &str) -> String {
        let prompt = generate_description_prompt(name, category, keywords, self.max_chars);

        tracing::debug!(
            provider = self.provider.name(),
            model = %self.provider.model(),
            item = %name,
            "Requesting item description"
        );

        match self.provider.generate(&prompt).await {
            Ok(Some(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    tracing::warn!(item = %name, "Provider returned blank description");
                    FALLBACK_EMPTY_RESPONSE.to_string()
                } else {
                    trimmed.to_string()
                }
            }
            Ok(None) => {
                tracing::warn!(item = %name, "Provider returned no description");
                FALLBACK_EMPTY_RESPONSE.to_string()
            }
            Err(e) => {
                tracing::error!(provider = self.provider.name(), "Description generation failed: {:#}", e);
                FALLBACK_CONNECTION_ERROR.to_string()
            }
        }
    }
}

impl std::fmt::Debug for DescriptionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptionClient")
            .field("provider", &self.provider.name())
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::test_utils::StaticProvider;

    fn client(provider: StaticProvider) -> DescriptionClient {
        DescriptionClient::new(Arc::new(provider), 300)
    }

    #[tokio::test]
    async fn test_returns_trimmed_text() {
        let c = client(StaticProvider::text("  Mesa robusta de madeira.\n"));
        let desc = c.generate_description("Mesa", "Sala", "madeira").await;
        assert_eq!(desc, "Mesa robusta de madeira.");
    }

    #[tokio::test]
    async fn test_failure_maps_to_connection_fallback() {
        let c = client(StaticProvider::failing(InventoryError::Provider(
            "connection refused".to_string(),
        )));
        let desc = c.generate_description("Mesa", "Sala", "").await;
        assert_eq!(desc, "Erro ao conectar com a IA. Tente novamente.");
    }

    #[tokio::test]
    async fn test_missing_text_maps_to_empty_fallback() {
        let c = client(StaticProvider::empty());
        let desc = c.generate_description("Mesa", "Sala", "").await;
        assert_eq!(desc, "Não foi possível gerar a descrição.");
    }

    #[tokio::test]
    async fn test_blank_text_maps_to_empty_fallback() {
        let c = client(StaticProvider::text("   \n\t"));
        let desc = c.generate_description("Mesa", "Sala", "").await;
        assert_eq!(desc, FALLBACK_EMPTY_RESPONSE);
    }

    #[tokio::test]
    async fn test_prompt_reaches_provider() {
        let provider = StaticProvider::text("ok");
        let prompts = provider.prompts();
        let c = client(provider);
        c.generate_description("Cama Box King", "Quarto", "rústico").await;

        let seen = prompts.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("Nome do Item: Cama Box King"));
        assert!(seen[0].contains("Detalhes/Tags: rústico"));
        assert!(seen[0].contains("máximo 300 caracteres"));
    }
}
