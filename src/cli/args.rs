//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// recap - Summarize stored transcripts with an LLM
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a stored transcript and save the result
    Summarize {
        /// Transcript ID
        id: String,
    },

    /// Transcript management commands
    #[command(subcommand)]
    Transcript(TranscriptCommand),

    /// Summary commands
    #[command(subcommand)]
    Summary(SummaryCommand),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TranscriptCommand {
    /// Store a transcript (reads stdin when no file is given)
    Add {
        /// Transcript ID (defaults to a random UUID)
        #[arg(long)]
        id: Option<String>,

        /// Read the transcript from this file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print a stored transcript
    Show {
        /// Transcript ID
        id: String,
    },

    /// List stored transcripts
    List {
        /// Maximum number of transcripts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Delete a transcript and its summary
    Delete {
        /// Transcript ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SummaryCommand {
    /// Print the saved summary of a transcript
    Show {
        /// Transcript ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration (API key masked)
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
