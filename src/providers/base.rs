//! Base provider trait for text generation backends

use crate::error::Result;
use async_trait::async_trait;

/// Provider trait for AI text generation
///
/// Implementations send a single prompt to an external service and return
/// the text it produced. They do no retrying or caching; callers decide
/// how to degrade on failure.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate text for a prompt
    ///
    /// # Arguments
    ///
    /// * `prompt` - Fully composed prompt text
    ///
    /// # Returns
    ///
    /// Returns `Some(text)` with the raw (untrimmed) generated text, or
    /// `None` when the service answered without any text
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the service returns a non-success
    /// status, or the response body cannot be parsed
    async fn generate(&self, prompt: &str) -> Result<Option<String>>;

    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Model identifier the provider sends requests to
    fn model(&self) -> String;
}
