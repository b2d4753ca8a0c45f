use tracing::{error, info, info_span, warn, Instrument};

use crate::language::LanguageDetector;
use crate::llm::prompts::{build_prompt, resolve_instruction, DEFAULT_LANGUAGE};
use crate::llm::LlmProvider;
use crate::summarization::{SummarizeError, SummarySink, TranscriptStore};

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub transcript_id: String,
    /// Language the instruction was written in
    pub language: String,
    pub summary: String,
}

/// Runs one transcript through fetch, detect, prompt, LLM and save.
///
/// Nothing is saved unless the LLM call succeeds.
pub struct SummarizationPipeline<'a> {
    store: &'a dyn TranscriptStore,
    detector: &'a dyn LanguageDetector,
    llm: &'a dyn LlmProvider,
    sink: &'a dyn SummarySink,
}

impl<'a> SummarizationPipeline<'a> {
    pub fn new(
        store: &'a dyn TranscriptStore,
        detector: &'a dyn LanguageDetector,
        llm: &'a dyn LlmProvider,
        sink: &'a dyn SummarySink,
    ) -> Self {
        Self {
            store,
            detector,
            llm,
            sink,
        }
    }

    pub async fn summarize(&self, transcript_id: &str) -> Result<SummaryOutcome, SummarizeError> {
        info!(transcript_id, "Summarization started");

        let transcript = self.store.get_transcript(transcript_id).map_err(|source| {
            error!(transcript_id, error = %source, "Failed to fetch transcript");
            SummarizeError::TranscriptNotFound {
                transcript_id: transcript_id.to_string(),
                source,
            }
        })?;
        info!(transcript_id, "Fetched transcript");

        let language = match self.detector.detect(&transcript) {
            Ok(language) => {
                info!(transcript_id, language = %language, "Detected language");
                language
            }
            Err(e) => {
                error!(transcript_id, error = %e, "Language detection failed");
                warn!(
                    transcript_id,
                    fallback = DEFAULT_LANGUAGE,
                    "Falling back to default language"
                );
                DEFAULT_LANGUAGE.to_string()
            }
        };

        let (language, instruction) = match resolve_instruction(&language) {
            Some(instruction) => (language, instruction),
            None => {
                warn!(
                    transcript_id,
                    language = %language,
                    fallback = DEFAULT_LANGUAGE,
                    "No summary instruction for language, using default"
                );
                let instruction = resolve_instruction(DEFAULT_LANGUAGE).unwrap_or_default();
                (DEFAULT_LANGUAGE.to_string(), instruction)
            }
        };

        let prompt = build_prompt(instruction, &transcript);

        let summary = self
            .llm
            .summarize(&prompt)
            .instrument(info_span!("llm_call", transcript_id))
            .await
            .inspect_err(|e| {
                error!(transcript_id, error = %e, "Error during summarization");
            })?;
        info!(transcript_id, "Generated summary");

        self.sink
            .save_summary(transcript_id, &summary)
            .map_err(SummarizeError::Persistence)?;
        info!(transcript_id, "Summary saved");

        Ok(SummaryOutcome {
            transcript_id: transcript_id.to_string(),
            language,
            summary,
        })
    }
}
