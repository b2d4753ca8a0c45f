use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use recap::language::{DetectError, LanguageDetector};
use recap::llm::{LlmError, LlmProvider, RetryPolicy};
use recap::summarization::{SummarySink, TranscriptStore};

#[derive(Default)]
pub struct MockTranscriptStore {
    transcripts: HashMap<String, String>,
    pub fetches: Cell<usize>,
}

impl MockTranscriptStore {
    pub fn with(id: &str, text: &str) -> Self {
        let mut store = Self::default();
        store.transcripts.insert(id.to_string(), text.to_string());
        store
    }
}

impl TranscriptStore for MockTranscriptStore {
    fn get_transcript(&self, id: &str) -> Result<String> {
        self.fetches.set(self.fetches.get() + 1);
        self.transcripts
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("connection to transcript database refused"))
    }
}

pub struct MockDetector(pub Result<String, DetectError>);

impl MockDetector {
    pub fn language(code: &str) -> Self {
        Self(Ok(code.to_string()))
    }

    pub fn failing() -> Self {
        Self(Err(DetectError::Inconclusive))
    }
}

impl LanguageDetector for MockDetector {
    fn detect(&self, _text: &str) -> Result<String, DetectError> {
        self.0.clone()
    }
}

/// Replays scripted responses and records every prompt it receives.
#[derive(Default)]
pub struct MockLlm {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn replying(summary: &str) -> Self {
        Self::scripted(vec![Ok(summary.to_string())])
    }

    pub fn scripted(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    async fn summarize(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::MalformedResponse("no scripted response".into())))
    }
}

/// Fails a fixed number of times inside a real retry policy, then succeeds.
pub struct RetryingLlm {
    policy: RetryPolicy,
    failures_left: AtomicU32,
}

impl RetryingLlm {
    pub fn failing_times(failures: u32, policy: RetryPolicy) -> Self {
        Self {
            policy,
            failures_left: AtomicU32::new(failures),
        }
    }
}

#[async_trait]
impl LlmProvider for RetryingLlm {
    async fn summarize(&self, _prompt: &str) -> Result<String, LlmError> {
        self.policy
            .run(
                || async move {
                    let failed = self
                        .failures_left
                        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                        .is_ok();
                    if failed {
                        Err(LlmError::MalformedResponse("upstream busy".into()))
                    } else {
                        Ok("Recovered summary.".to_string())
                    }
                },
                |_: &LlmError| true,
            )
            .await
    }
}

#[derive(Default)]
pub struct MockSink {
    pub saved: RefCell<Vec<(String, String)>>,
    pub fail: bool,
}

impl MockSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl SummarySink for MockSink {
    fn save_summary(&self, transcript_id: &str, summary: &str) -> Result<()> {
        if self.fail {
            return Err(anyhow!("disk full"));
        }
        self.saved
            .borrow_mut()
            .push((transcript_id.to_string(), summary.to_string()));
        Ok(())
    }
}
