//! SS Móveis - furniture inventory console library
//!
//! This library provides the core functionality for the SS Móveis inventory
//! console: simulated sign-in, an in-memory furniture catalog, and AI-written
//! marketing descriptions for new items.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `app`: Screen state machine and the controller that runs its async work
//! - `auth`: Pluggable authentication with a simulated backend
//! - `catalog`: In-memory item store
//! - `generation`: Description client with fixed fallback texts
//! - `providers`: Text generation backends (Gemini, Ollama)
//! - `prompts`: Prompt templates
//! - `commands`: Terminal front-end
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use ssmoveis::{Config, DescriptionClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let client = DescriptionClient::from_config(&config.generation)?;
//!     let text = client
//!         .generate_description("Mesa de Jantar", "Sala de Jantar", "madeira maciça")
//!         .await;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod auth;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generation;
pub mod prompts;
pub mod providers;

// Re-export commonly used types
pub use app::{Action, AppState, Controller, View};
pub use auth::{Authenticator, Session, SimulatedAuthenticator};
pub use catalog::{Catalog, CatalogItem, NewItem};
pub use config::Config;
pub use error::{InventoryError, Result};
pub use generation::DescriptionClient;

#[cfg(test)]
pub mod test_utils;
