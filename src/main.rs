//! SS Móveis - furniture inventory console
//!
#![doc = "SS Móveis - furniture inventory console"]
#![doc = "Main entry point for the SS Móveis application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ssmoveis::cli::{Cli, Commands};
use ssmoveis::commands;
use ssmoveis::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Logs go to stderr so they never mix with screens or generated text
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command_or_default() {
        Commands::Run => {
            tracing::info!("Starting interactive console");
            commands::console::run_console(config).await?;
            Ok(())
        }
        Commands::Generate {
            name,
            category,
            keywords,
        } => {
            tracing::info!("Starting one-shot description generation");
            commands::generate::run_generate(config, name, category, keywords).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "ssmoveis=debug"
    } else {
        "ssmoveis=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
