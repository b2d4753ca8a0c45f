//! SQLite database management

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::config::Settings;
use crate::storage::models::{Summary, Transcript};

/// Database wrapper for recap
pub struct Database {
    conn: Connection,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

impl Database {
    /// Open or create the database
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open_path(&db_path)
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {} is newer than supported version {}",
                current_version,
                CURRENT_SCHEMA_VERSION
            );
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute_batch(&format!("PRAGMA user_version = {};", version))?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS transcripts (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_transcripts_created_at
                ON transcripts(created_at DESC);

            CREATE TABLE IF NOT EXISTS summaries (
                transcript_id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (transcript_id) REFERENCES transcripts(id) ON DELETE CASCADE
            );
            "#,
        )?;

        Ok(())
    }

    /// Insert a new transcript
    pub fn insert_transcript(&self, transcript: &Transcript) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO transcripts (id, text, created_at) VALUES (?1, ?2, ?3)",
                params![
                    transcript.id,
                    transcript.text,
                    transcript.created_at.timestamp()
                ],
            )
            .with_context(|| format!("Failed to store transcript {}", transcript.id))?;

        Ok(())
    }

    /// Get a transcript by ID
    pub fn get_transcript(&self, id: &str) -> Result<Option<Transcript>> {
        let transcript = self
            .conn
            .query_row(
                "SELECT id, text, created_at FROM transcripts WHERE id = ?1",
                params![id],
                Self::row_to_transcript,
            )
            .optional()?;

        Ok(transcript)
    }

    /// List transcripts, newest first
    pub fn list_transcripts(&self, limit: usize) -> Result<Vec<Transcript>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, text, created_at
             FROM transcripts
             ORDER BY created_at DESC, id
             LIMIT ?1",
        )?;

        let transcripts = stmt
            .query_map(params![limit as i64], Self::row_to_transcript)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(transcripts)
    }

    /// Delete a transcript and its summary. Returns whether a row was removed.
    pub fn delete_transcript(&self, id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM transcripts WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// Insert or replace the summary for a transcript
    pub fn upsert_summary(&self, transcript_id: &str, text: &str) -> Result<()> {
        let now = Utc::now().timestamp();

        self.conn.execute(
            r#"
            INSERT INTO summaries (transcript_id, text, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            ON CONFLICT(transcript_id) DO UPDATE
            SET text = excluded.text, updated_at = excluded.updated_at
            "#,
            params![transcript_id, text, now],
        )?;

        Ok(())
    }

    /// Get the summary stored for a transcript
    pub fn get_summary(&self, transcript_id: &str) -> Result<Option<Summary>> {
        let summary = self
            .conn
            .query_row(
                "SELECT transcript_id, text, created_at, updated_at FROM summaries WHERE transcript_id = ?1",
                params![transcript_id],
                |row| {
                    Ok(Summary {
                        transcript_id: row.get(0)?,
                        text: row.get(1)?,
                        created_at: from_timestamp(row.get(2)?),
                        updated_at: from_timestamp(row.get(3)?),
                    })
                },
            )
            .optional()?;

        Ok(summary)
    }

    fn row_to_transcript(row: &rusqlite::Row) -> rusqlite::Result<Transcript> {
        Ok(Transcript {
            id: row.get(0)?,
            text: row.get(1)?,
            created_at: from_timestamp(row.get(2)?),
        })
    }
}

fn from_timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}
