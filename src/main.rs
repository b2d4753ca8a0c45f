//! recap - Summarize stored transcripts with an LLM
//!
//! Entry point for the recap CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recap::cli::{Cli, Commands};
use recap::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        recap::cli::commands::print_completions(shell);
        return Ok(());
    }

    // Local overrides for LLM_API_URL / LLM_API_KEY
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    init_logging(&settings, cli.verbose);

    match cli.command {
        Commands::Summarize { id } => {
            recap::cli::commands::summarize_transcript(&settings, &id).await?;
        }
        Commands::Transcript(cmd) => {
            recap::cli::commands::transcript_command(&settings, cmd)?;
        }
        Commands::Summary(cmd) => {
            recap::cli::commands::summary_command(&settings, cmd)?;
        }
        Commands::Config(cmd) => {
            recap::cli::commands::config_command(&settings, cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}

fn init_logging(settings: &Settings, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.general.log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
