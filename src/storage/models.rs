//! Data models for storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text to be summarized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Opaque identifier chosen by whoever imported the transcript
    pub id: String,

    /// Full transcript text
    pub text: String,

    /// Import timestamp
    pub created_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a transcript with the given id
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a transcript with a random UUID
    pub fn with_generated_id(text: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), text)
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Stored summary of a transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub transcript_id: String,

    pub text: String,

    /// First time a summary was saved for this transcript
    pub created_at: DateTime<Utc>,

    /// Last time the summary text was replaced
    pub updated_at: DateTime<Utc>,
}
