//! Storage module for recap
//!
//! Keeps transcripts and their summaries in a local SQLite database.

mod database;
mod models;
mod repository;

pub use database::Database;
pub use models::{Summary, Transcript};
pub use repository::Repository;
