//! CLI command implementations

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Read;
use std::path::PathBuf;

use crate::cli::args::{Cli, ConfigCommand, SummaryCommand, TranscriptCommand};
use crate::config::Settings;
use crate::language::StopwordDetector;
use crate::llm::ChatCompletionClient;
use crate::storage::{Repository, Transcript};
use crate::summarization::SummarizationPipeline;

/// Summarize a stored transcript and save the result
pub async fn summarize_transcript(settings: &Settings, id: &str) -> Result<()> {
    let repository = Repository::new(settings)?;
    let detector = StopwordDetector::new();
    let llm = ChatCompletionClient::from_settings(settings)?;

    let pipeline = SummarizationPipeline::new(&repository, &detector, &llm, &repository);
    let outcome = pipeline.summarize(id).await?;

    println!(
        "Summary saved for {} ({}):",
        outcome.transcript_id, outcome.language
    );
    println!();
    println!("{}", outcome.summary);

    Ok(())
}

/// Transcript management commands
pub fn transcript_command(settings: &Settings, cmd: TranscriptCommand) -> Result<()> {
    let repository = Repository::new(settings)?;

    match cmd {
        TranscriptCommand::Add { id, file } => {
            let text = read_transcript_text(file)?;
            if text.trim().is_empty() {
                anyhow::bail!("Transcript text is empty");
            }

            let transcript = match id {
                Some(id) => Transcript::new(id, text),
                None => Transcript::with_generated_id(text),
            };
            repository.add_transcript(&transcript)?;

            tracing::debug!(
                transcript_id = %transcript.id,
                words = transcript.word_count(),
                "Stored transcript"
            );
            println!("{}", transcript.id);
        }
        TranscriptCommand::Show { id } => {
            let transcript = repository
                .transcript(&id)?
                .with_context(|| format!("Transcript not found: {}", id))?;
            println!("{}", transcript.text);
        }
        TranscriptCommand::List { limit } => {
            let transcripts = repository.list_recent(limit)?;
            if transcripts.is_empty() {
                println!("No transcripts stored.");
                return Ok(());
            }

            for transcript in transcripts {
                let summarized = repository.summary(&transcript.id)?.is_some();
                println!(
                    "{}  {}  {:>6} words  {}",
                    transcript.id,
                    transcript.created_at.format("%Y-%m-%d %H:%M"),
                    transcript.word_count(),
                    if summarized { "summarized" } else { "-" }
                );
            }
        }
        TranscriptCommand::Delete { id } => {
            if !repository.delete_transcript(&id)? {
                anyhow::bail!("Transcript not found: {}", id);
            }
            println!("Deleted transcript {}", id);
        }
    }

    Ok(())
}

/// Summary commands
pub fn summary_command(settings: &Settings, cmd: SummaryCommand) -> Result<()> {
    let repository = Repository::new(settings)?;

    match cmd {
        SummaryCommand::Show { id } => {
            let summary = repository
                .summary(&id)?
                .with_context(|| format!("No summary saved for transcript {}", id))?;
            println!("{}", summary.text);
        }
    }

    Ok(())
}

/// Configuration management
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            println!("{}", settings.to_redacted_toml()?);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Print completion script for the requested shell to stdout.
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

fn read_transcript_text(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transcript file: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read transcript from stdin")?;
            Ok(text)
        }
    }
}
