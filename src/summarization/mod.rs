//! Summarization pipeline for recap
//!
//! Fetches a transcript, detects its language, builds the prompt, asks the
//! LLM for a summary and saves it.

mod pipeline;

pub use pipeline::{SummarizationPipeline, SummaryOutcome};

use thiserror::Error;

use crate::llm::LlmError;

/// Source of transcript text
pub trait TranscriptStore {
    fn get_transcript(&self, id: &str) -> anyhow::Result<String>;
}

/// Destination for finished summaries
pub trait SummarySink {
    fn save_summary(&self, transcript_id: &str, summary: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Transcript not found: {transcript_id}")]
    TranscriptNotFound {
        transcript_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Persistence(anyhow::Error),
}
