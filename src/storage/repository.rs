//! Repository pattern wrapper for database operations
//!
//! Provides the transcript store and summary sink used by the
//! summarization pipeline, plus the lookups the CLI needs.

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::storage::{Database, Summary, Transcript};
use crate::summarization::{SummarySink, TranscriptStore};

/// Repository for managing transcripts and summaries
pub struct Repository {
    db: Database,
}

impl Repository {
    /// Create a new repository
    pub fn new(settings: &Settings) -> Result<Self> {
        let db = Database::open(settings)?;
        Ok(Self { db })
    }

    /// Wrap an already opened database
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    /// Store a new transcript
    pub fn add_transcript(&self, transcript: &Transcript) -> Result<()> {
        self.db.insert_transcript(transcript)
    }

    /// Get a transcript by ID
    pub fn transcript(&self, id: &str) -> Result<Option<Transcript>> {
        self.db.get_transcript(id)
    }

    /// List recent transcripts
    pub fn list_recent(&self, limit: usize) -> Result<Vec<Transcript>> {
        self.db.list_transcripts(limit)
    }

    /// Remove a transcript and its summary
    pub fn delete_transcript(&self, id: &str) -> Result<bool> {
        self.db.delete_transcript(id)
    }

    /// Get the stored summary for a transcript
    pub fn summary(&self, transcript_id: &str) -> Result<Option<Summary>> {
        self.db.get_summary(transcript_id)
    }
}

impl TranscriptStore for Repository {
    fn get_transcript(&self, id: &str) -> Result<String> {
        self.db
            .get_transcript(id)?
            .map(|transcript| transcript.text)
            .with_context(|| format!("No transcript stored with id {}", id))
    }
}

impl SummarySink for Repository {
    fn save_summary(&self, transcript_id: &str, summary: &str) -> Result<()> {
        self.db
            .upsert_summary(transcript_id, summary)
            .with_context(|| format!("Failed to save summary for transcript {}", transcript_id))
    }
}
