//! LLM module for recap
//!
//! Talks to a chat-completion endpoint to turn transcripts into summaries.
//! Each call gets a timeout sized to the prompt and a bounded retry policy.

mod chat;
mod client;
pub mod prompts;
mod retry;
mod timeout;

pub use chat::ChatCompletionClient;
pub use client::{LlmError, LlmProvider};
pub use retry::RetryPolicy;
pub use timeout::TimeoutPolicy;
