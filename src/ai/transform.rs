//! Length-Limited Text Transforms
//!
//! Two transforms wrap a generative [`LlmProvider`]:
//! - [`Simplifier`]: rewrites a chunk in plainer language
//! - [`Summarizer`]: condenses a chunk
//!
//! Each one sends a single request per chunk, bounded by a maximum output
//! length, and keeps only the first candidate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{
    GenerationOutput, GenerationRequest, SharedProvider, clean_up_tokenization_spaces, preview,
};
use crate::constants::transform::{SIMPLIFY_MAX_LENGTH, SIMPLIFY_PREFIX, SUMMARIZE_MAX_LENGTH};
use crate::types::{Result, StudyError, TransformKind};

const SIMPLIFY_INSTRUCTION: &str = "You rewrite study text in simpler language. \
The input starts with \"simplify:\". Keep every fact, use short sentences and common words, \
and reply with the rewritten text only.";

const SUMMARIZE_INSTRUCTION: &str = "You summarize study text. \
Reply with a short summary of the input in plain sentences and nothing else.";

/// Single-chunk text-to-text operation
#[async_trait]
pub trait Transform: Send + Sync {
    /// Which transform this is
    fn kind(&self) -> TransformKind;

    /// Transform one chunk, returning the first candidate's text
    async fn apply(&self, chunk: &str) -> Result<String>;
}

/// Simplification candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Summarization candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryText {
    pub summary_text: String,
}

/// Send `request` and return the raw candidates, best first
async fn candidates(provider: &SharedProvider, request: &GenerationRequest) -> Result<Vec<String>> {
    let output = provider.generate(request).await?;
    debug!("{} for '{}'", describe(&output), preview(&request.prompt, 40));
    Ok(output.candidates)
}

/// One-line account of a provider response for debug logs
fn describe(output: &GenerationOutput) -> String {
    format!(
        "{}/{} returned {} candidate(s), {} tokens in {}ms",
        output.metadata.provider,
        output.metadata.model,
        output.candidates.len(),
        output.usage.total(),
        output.timing.total_ms
    )
}

fn no_candidates(kind: TransformKind) -> StudyError {
    StudyError::transform(kind, "provider returned no candidates")
}

// =============================================================================
// Simplifier
// =============================================================================

/// Rewrites text with a `"simplify: "` task prefix
pub struct Simplifier {
    provider: SharedProvider,
    max_length: usize,
}

impl Simplifier {
    pub fn new(provider: SharedProvider) -> Self {
        Self::with_max_length(provider, SIMPLIFY_MAX_LENGTH)
    }

    pub fn with_max_length(provider: SharedProvider, max_length: usize) -> Self {
        Self {
            provider,
            max_length,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn request(&self, chunk: &str) -> GenerationRequest {
        GenerationRequest::new(format!("{}{}", SIMPLIFY_PREFIX, chunk), self.max_length)
            .with_system(SIMPLIFY_INSTRUCTION)
    }

    /// All candidates for `chunk`, best first
    pub async fn simplify(&self, chunk: &str) -> Result<Vec<GeneratedText>> {
        let texts = candidates(&self.provider, &self.request(chunk)).await?;
        Ok(texts
            .into_iter()
            .map(|text| GeneratedText {
                generated_text: clean_up_tokenization_spaces(&text),
            })
            .collect())
    }
}

#[async_trait]
impl Transform for Simplifier {
    fn kind(&self) -> TransformKind {
        TransformKind::Simplify
    }

    async fn apply(&self, chunk: &str) -> Result<String> {
        self.simplify(chunk)
            .await?
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or_else(|| no_candidates(self.kind()))
    }
}

// =============================================================================
// Summarizer
// =============================================================================

/// Condenses text; the chunk is sent unchanged
pub struct Summarizer {
    provider: SharedProvider,
    max_length: usize,
}

impl Summarizer {
    pub fn new(provider: SharedProvider) -> Self {
        Self::with_max_length(provider, SUMMARIZE_MAX_LENGTH)
    }

    pub fn with_max_length(provider: SharedProvider, max_length: usize) -> Self {
        Self {
            provider,
            max_length,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn request(&self, chunk: &str) -> GenerationRequest {
        GenerationRequest::new(chunk, self.max_length).with_system(SUMMARIZE_INSTRUCTION)
    }

    /// All candidates for `chunk`, best first
    pub async fn summarize(&self, chunk: &str) -> Result<Vec<SummaryText>> {
        let texts = candidates(&self.provider, &self.request(chunk)).await?;
        Ok(texts
            .into_iter()
            .map(|text| SummaryText {
                summary_text: text.trim().to_string(),
            })
            .collect())
    }
}

#[async_trait]
impl Transform for Summarizer {
    fn kind(&self) -> TransformKind {
        TransformKind::Summarize
    }

    async fn apply(&self, chunk: &str) -> Result<String> {
        self.summarize(chunk)
            .await?
            .into_iter()
            .next()
            .map(|c| c.summary_text)
            .ok_or_else(|| no_candidates(self.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{LlmProvider, ResponseMetadata, ResponseTiming, TokenUsage};
    use crate::types::{ErrorCategory, LlmError};
    use std::sync::{Arc, Mutex};

    /// Records requests and answers with fixed candidates
    struct RecordingProvider {
        candidates: Vec<String>,
        fail: bool,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl RecordingProvider {
        fn answering(candidates: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                candidates: candidates.iter().map(|c| c.to_string()).collect(),
                fail: false,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                candidates: Vec::new(),
                fail: true,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> GenerationRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(LlmError::new(ErrorCategory::Network, "connection refused").into());
            }
            Ok(GenerationOutput::candidates_only(self.candidates.clone()))
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn model(&self) -> &str {
            "test-model"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_simplifier_prefixes_chunk_and_takes_first_candidate() {
        let provider = RecordingProvider::answering(&[" Cats sit . ", "second"]);
        let simplifier = Simplifier::new(provider.clone());

        let out = simplifier.apply("Felines repose.").await.unwrap();

        assert_eq!(out, "Cats sit.");
        let request = provider.last_request();
        assert_eq!(request.prompt, "simplify: Felines repose.");
        assert_eq!(request.max_tokens, SIMPLIFY_MAX_LENGTH);
        assert!(request.system.is_some());
    }

    #[tokio::test]
    async fn test_summarizer_sends_chunk_unchanged() {
        let provider = RecordingProvider::answering(&["Short."]);
        let summarizer = Summarizer::new(provider.clone());

        let out = summarizer.apply("A long passage.").await.unwrap();

        assert_eq!(out, "Short.");
        let request = provider.last_request();
        assert_eq!(request.prompt, "A long passage.");
        assert_eq!(request.max_tokens, SUMMARIZE_MAX_LENGTH);
    }

    #[tokio::test]
    async fn test_summary_is_trimmed_but_not_respaced() {
        let provider = RecordingProvider::answering(&["  Cats sit . They nap , too.  "]);

        let out = Summarizer::new(provider).apply("x").await.unwrap();

        assert_eq!(out, "Cats sit . They nap , too.");
    }

    #[test]
    fn test_describe_reports_metadata_and_timing() {
        let output = GenerationOutput::with_metrics(
            vec!["a".to_string(), "b".to_string()],
            TokenUsage::from_openai(20, 10),
            ResponseTiming::from_duration(std::time::Duration::from_millis(250)),
            ResponseMetadata {
                model: "gpt-4o-mini".to_string(),
                provider: "openai".to_string(),
            },
        );

        assert_eq!(
            describe(&output),
            "openai/gpt-4o-mini returned 2 candidate(s), 30 tokens in 250ms"
        );
    }

    #[tokio::test]
    async fn test_typed_candidates_keep_order() {
        let provider = RecordingProvider::answering(&["one", "two"]);
        let summaries = Summarizer::new(provider.clone()).summarize("x").await.unwrap();
        assert_eq!(
            summaries,
            vec![
                SummaryText {
                    summary_text: "one".to_string()
                },
                SummaryText {
                    summary_text: "two".to_string()
                },
            ]
        );

        let simplified = Simplifier::new(provider).simplify("x").await.unwrap();
        assert_eq!(simplified[1].generated_text, "two");
    }

    #[tokio::test]
    async fn test_empty_candidate_list_is_transform_error() {
        let provider = RecordingProvider::answering(&[]);

        let err = Simplifier::new(provider.clone()).apply("x").await.unwrap_err();
        assert!(matches!(
            err,
            StudyError::Transform {
                kind: TransformKind::Simplify,
                ..
            }
        ));

        let err = Summarizer::new(provider).apply("x").await.unwrap_err();
        assert!(matches!(
            err,
            StudyError::Transform {
                kind: TransformKind::Summarize,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let err = Summarizer::new(RecordingProvider::failing())
            .apply("x")
            .await
            .unwrap_err();
        assert_eq!(err.category(), Some(ErrorCategory::Network));
    }

    #[tokio::test]
    async fn test_custom_max_length() {
        let provider = RecordingProvider::answering(&["ok"]);
        let simplifier = Simplifier::with_max_length(provider.clone(), 64);
        simplifier.apply("x").await.unwrap();

        assert_eq!(simplifier.max_length(), 64);
        assert_eq!(provider.last_request().max_tokens, 64);
    }
}
