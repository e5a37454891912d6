use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use ssmoveis::providers::Provider;
use ssmoveis::{InventoryError, Result};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Provider that replays a fixed answer and records prompts
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FakeProvider {
    answer: Option<String>,
    fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl FakeProvider {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(InventoryError::Provider("unreachable".to_string()).into());
        }
        Ok(self.answer.clone())
    }

    fn name(&self) -> &'static str {
        "fake"
    }

    fn model(&self) -> String {
        "fake-model".to_string()
    }
}
