//! Language detection for transcripts
//!
//! The detector only has to pick one of the languages we have summary
//! instructions for; anything it cannot decide is reported as an error and
//! handled by the caller.

mod stopwords;

pub use stopwords::StopwordDetector;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DetectError {
    #[error("Cannot detect the language of empty text")]
    EmptyText,

    #[error("No known language matched the text")]
    Inconclusive,
}

pub trait LanguageDetector {
    /// Return a lowercase ISO 639-1 code such as `"en"`.
    fn detect(&self, text: &str) -> Result<String, DetectError>;
}
