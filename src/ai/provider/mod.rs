//! LLM Provider Abstraction
//!
//! Defines the [`LlmProvider`] trait: a black-box text-to-text service that
//! takes a prompt plus a maximum output length and returns a list of candidate
//! texts. Transforms consume only the first candidate.
//!
//! ## Providers
//!
//! - `ollama`: local models through the Ollama HTTP API (default)
//! - `openai`: any OpenAI-compatible chat completions endpoint

mod ollama;
mod openai;
mod prompt_utils;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use prompt_utils::{clean_up_tokenization_spaces, preview};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::{Result, StudyError};

// =============================================================================
// Request / Output
// =============================================================================

/// A single generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Task instruction sent as the system prompt
    pub system: Option<String>,
    /// Text to transform
    pub prompt: String,
    /// Maximum number of tokens to generate
    pub max_tokens: usize,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: usize) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            max_tokens,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Provider output: ordered candidates plus usage metrics
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Generated candidates, best first
    pub candidates: Vec<String>,
    /// Token usage metrics
    pub usage: TokenUsage,
    /// Response timing
    pub timing: ResponseTiming,
    /// Provider and model info
    pub metadata: ResponseMetadata,
}

impl GenerationOutput {
    /// Output with candidates only (usage/timing unknown)
    pub fn candidates_only(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
            metadata: ResponseMetadata::default(),
        }
    }

    pub fn with_metrics(
        candidates: Vec<String>,
        usage: TokenUsage,
        timing: ResponseTiming,
        metadata: ResponseMetadata,
    ) -> Self {
        Self {
            candidates,
            usage,
            timing,
            metadata,
        }
    }
}

/// Token usage metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt)
    pub input_tokens: u32,
    /// Output tokens (response)
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    /// Create from OpenAI-style usage response
    pub fn from_openai(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            input_tokens: prompt_tokens,
            output_tokens: completion_tokens,
        }
    }

    /// Create from Ollama-style usage response
    pub fn from_ollama(prompt_eval_count: u32, eval_count: u32) -> Self {
        Self {
            input_tokens: prompt_eval_count,
            output_tokens: eval_count,
        }
    }
}

/// Response timing metrics
#[derive(Debug, Clone, Default)]
pub struct ResponseTiming {
    /// Total response time in milliseconds (wall clock)
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    /// Model used
    pub model: String,
    /// Provider name
    pub provider: String,
}

/// Shared LLM provider handle
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// Provider Configuration
// =============================================================================

/// Configuration for LLM providers
///
/// API keys are never serialized and are redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider type: "ollama", "openai"
    pub provider: String,
    /// Model name (provider-specific)
    pub model: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Temperature for generation (0.0 = deterministic)
    pub temperature: f32,
    /// API key (OpenAI-compatible endpoints)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL (for custom endpoints)
    #[serde(default)]
    pub api_base: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: None,
            timeout_secs: crate::constants::network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.0,
            api_key: None,
            api_base: None,
        }
    }
}

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// Black-box generative text service
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate candidates for a request.
    ///
    /// Failures are returned, never retried here.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;

    /// Check if the provider is available
    async fn health_check(&self) -> Result<bool>;
}

/// Create a shared provider from configuration
pub fn create_provider(config: &ProviderConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        "ollama" => Ok(Arc::new(OllamaProvider::new(config.clone())?)),
        "openai" => Ok(Arc::new(OpenAiProvider::new(config.clone())?)),
        _ => Err(StudyError::Config(format!(
            "Unknown provider: {}. Supported: ollama, openai",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = ProviderConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[test]
    fn test_create_provider_unknown() {
        let config = ProviderConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(matches!(err, StudyError::Config(_)));
    }

    #[test]
    fn test_create_provider_ollama() {
        let provider = create_provider(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("text", 64).with_system("be brief");
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert_eq!(request.max_tokens, 64);
    }
}
