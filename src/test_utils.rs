//! Test utilities for SS Móveis
//!
//! Fake text generation providers used by the unit tests.

use crate::error::{InventoryError, Result};
use crate::providers::Provider;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

enum Reply {
    Text(String),
    Empty,
    Fail(String),
}

/// Provider that always gives the same answer and records prompts
pub struct StaticProvider {
    reply: Reply,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl StaticProvider {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer with `text`
    pub fn text(text: &str) -> Self {
        Self::with_reply(Reply::Text(text.to_string()))
    }

    /// Answer with no text at all
    pub fn empty() -> Self {
        Self::with_reply(Reply::Empty)
    }

    /// Fail every call with a provider error carrying `error`'s message
    pub fn failing(error: InventoryError) -> Self {
        Self::with_reply(Reply::Fail(error.to_string()))
    }

    /// Shared log of prompts received so far
    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl Provider for StaticProvider {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        match &self.reply {
            Reply::Text(t) => Ok(Some(t.clone())),
            Reply::Empty => Ok(None),
            Reply::Fail(msg) => Err(InventoryError::Provider(msg.clone()).into()),
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }

    fn model(&self) -> String {
        "static-model".to_string()
    }
}

/// Provider that blocks until its gate is opened
pub struct GatedProvider {
    text: String,
    gate: Arc<Notify>,
}

impl GatedProvider {
    /// Answer with `text` once the gate is notified
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            gate: Arc::new(Notify::new()),
        }
    }

    /// Handle used to release the pending call
    pub fn gate(&self) -> Arc<Notify> {
        Arc::clone(&self.gate)
    }
}

#[async_trait]
impl Provider for GatedProvider {
    async fn generate(&self, _prompt: &str) -> Result<Option<String>> {
        self.gate.notified().await;
        Ok(Some(self.text.clone()))
    }

    fn name(&self) -> &'static str {
        "gated"
    }

    fn model(&self) -> String {
        "gated-model".to_string()
    }
}

/// Provider whose every call panics
pub struct PanickingProvider;

#[async_trait]
impl Provider for PanickingProvider {
    async fn generate(&self, _prompt: &str) -> Result<Option<String>> {
        panic!("provider exploded");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }

    fn model(&self) -> String {
        "panicking-model".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_records_prompts() {
        let provider = StaticProvider::text("ok");
        let log = provider.prompts();
        assert_eq!(provider.generate("a").await.unwrap().as_deref(), Some("ok"));
        assert_eq!(log.lock().unwrap().as_slice(), ["a".to_string()]);
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = StaticProvider::failing(InventoryError::Provider("down".to_string()));
        let err = provider.generate("a").await.unwrap_err();
        assert!(err.to_string().contains("down"));
    }

    #[tokio::test]
    async fn test_gated_provider_waits_for_gate() {
        let provider = Arc::new(GatedProvider::new("pronto"));
        let gate = provider.gate();
        let task = {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { provider.generate("x").await.unwrap() })
        };
        gate.notify_one();
        assert_eq!(task.await.unwrap().as_deref(), Some("pronto"));
    }
}
