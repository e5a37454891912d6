//! Command-line interface definition for SS Móveis
//!
//! This module defines the CLI structure using clap's derive API. Without a
//! subcommand the interactive console starts.

use clap::{Parser, Subcommand};

/// SS Móveis - inventory console with AI-written descriptions
///
/// Log in, browse and edit the furniture catalog, and ask an AI provider
/// for marketing descriptions of new items.
#[derive(Parser, Debug, Clone)]
#[command(name = "ssmoveis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the text generation provider (gemini, ollama)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Start with an empty catalog instead of the sample items
    #[arg(long)]
    pub no_samples: bool,

    /// Command to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive inventory console
    Run,

    /// Generate a single item description and print it
    Generate {
        /// Item name
        #[arg(short, long)]
        name: String,

        /// Item category
        #[arg(short = 'k', long)]
        category: String,

        /// Free-text details used as hints by the AI
        #[arg(long, default_value = "")]
        keywords: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, falling back to the interactive console
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            provider: None,
            no_samples: false,
            command: None,
        }
    }
}
