use async_trait::async_trait;
use thiserror::Error;

/// Longest error body kept from a failed response.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    pub(crate) fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }

    /// Whether the failure may succeed on another attempt.
    ///
    /// Transport failures (connect, timeout, body read) and any 4xx/5xx
    /// status qualify. A request that could not even be built, such as an
    /// empty endpoint URL, and a response we cannot read are final.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(err) => !err.is_builder(),
            Self::Status { .. } => true,
            Self::MalformedResponse(_) => false,
        }
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a fully assembled prompt and return the summary text.
    async fn summarize(&self, prompt: &str) -> Result<String, LlmError>;
}
