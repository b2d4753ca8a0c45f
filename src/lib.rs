//! recap - Summarize stored transcripts with an LLM
//!
//! Transcripts live in a local SQLite database. `recap summarize <id>`
//! detects the transcript's language, wraps it in a language-specific
//! instruction and sends it to a chat-completion endpoint, retrying
//! transient failures with exponential backoff.

pub mod cli;
pub mod config;
pub mod language;
pub mod llm;
pub mod storage;
pub mod summarization;

/// Application name
pub const APP_NAME: &str = "recap";
