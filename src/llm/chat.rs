use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::llm::client::{LlmError, LlmProvider};
use crate::llm::retry::RetryPolicy;
use crate::llm::timeout::TimeoutPolicy;

const DEFAULT_MODEL: &str = "mixtral";

/// OpenAI-style chat completion client.
pub struct ChatCompletionClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: TimeoutPolicy,
    retry: RetryPolicy,
}

impl ChatCompletionClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .build()
                .context("Failed to build LLM HTTP client")?,
            endpoint: endpoint.into().trim().to_string(),
            api_key: api_key.into().trim().to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: TimeoutPolicy::default(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.llm.endpoint.trim().is_empty() {
            warn!("LLM endpoint is not configured; requests will fail");
        }

        let client = Self::new(&settings.llm.endpoint, &settings.llm.api_key)?
            .with_timeout_policy(settings.timeout.policy())
            .with_retry_policy(settings.retry.policy());

        if settings.llm.model.trim().is_empty() {
            Ok(client)
        } else {
            Ok(client.with_model(settings.llm.model.trim()))
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_policy(mut self, timeout: TimeoutPolicy) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn send_completion_request(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        info!(
            timeout_secs = timeout.as_secs(),
            model = %self.model,
            "Calling LLM endpoint"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "LLM http request failed"))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let message = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!(error = %e, "Failed to read LLM error body");
                    "<unreadable body>".to_string()
                }
            };
            warn!(status = status.as_u16(), "LLM endpoint returned an error status");
            return Err(LlmError::status(status.as_u16(), &message));
        }

        let payload = response.bytes().await?;
        debug!(bytes = payload.len(), "Received LLM response");

        let parsed: ChatCompletionResponse = serde_json::from_slice(&payload)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                LlmError::MalformedResponse("response has no choices[0].message.content".into())
            })
    }
}

impl std::fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionClient {
    async fn summarize(&self, prompt: &str) -> Result<String, LlmError> {
        let timeout = self.timeout.timeout_for(prompt);

        self.retry
            .run(
                || self.send_completion_request(prompt, timeout),
                LlmError::is_transient,
            )
            .await
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
