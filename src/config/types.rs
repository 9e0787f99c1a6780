//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/studybuddy/) and project (.studybuddy/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ai::provider::ProviderConfig;
use crate::constants::{network, pipeline, transform};
use crate::types::{Result, StudyError, TransformKind};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// LLM provider settings shared by both transforms
    pub llm: LlmConfig,

    /// Simplification transform settings
    pub simplify: TransformSettings,

    /// Summarization transform settings
    pub summarize: TransformSettings,

    /// Chunking and question generation settings
    pub pipeline: PipelineConfig,

    /// Tokenizer resource settings
    pub tokenizer: TokenizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            simplify: TransformSettings::new(transform::SIMPLIFY_MAX_LENGTH),
            summarize: TransformSettings::new(transform::SUMMARIZE_MAX_LENGTH),
            pipeline: PipelineConfig::default(),
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `StudyError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(StudyError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(StudyError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.simplify.max_length == 0 {
            return Err(StudyError::Config(
                "simplify.max_length must be greater than 0".to_string(),
            ));
        }

        if self.summarize.max_length == 0 {
            return Err(StudyError::Config(
                "summarize.max_length must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for one transform kind
    pub fn transform(&self, kind: TransformKind) -> &TransformSettings {
        match kind {
            TransformKind::Simplify => &self.simplify,
            TransformKind::Summarize => &self.summarize,
        }
    }

    /// Provider configuration for `kind`, applying its model override
    pub fn provider_config(&self, kind: TransformKind) -> ProviderConfig {
        let model = self
            .transform(kind)
            .model
            .clone()
            .unwrap_or_else(|| self.llm.model.clone());

        ProviderConfig {
            provider: self.llm.provider.clone(),
            model: Some(model),
            timeout_secs: self.llm.timeout_secs,
            temperature: self.llm.temperature,
            api_key: self.llm.api_key.clone(),
            api_base: self.llm.api_base.clone(),
        }
    }

    /// Apply command-line overrides (highest priority)
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(provider) = &overrides.provider {
            self.llm.provider = provider.clone();
        }
        if let Some(model) = &overrides.model {
            self.llm.model = model.clone();
            self.simplify.model = None;
            self.summarize.model = None;
        }
        if let Some(max_words) = overrides.max_chunk_words {
            self.pipeline.max_chunk_words = max_words;
        }
        if let Some(count) = overrides.num_flashcards {
            self.pipeline.num_flashcards = count;
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub provider: Option<String>,
    /// Replaces the model of both transforms
    pub model: Option<String>,
    pub max_chunk_words: Option<usize>,
    pub num_flashcards: Option<usize>,
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "ollama", "openai"
    pub provider: String,

    /// Model name, used by both transforms unless overridden
    pub model: String,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,

    /// API key; prefer the OPENAI_API_KEY environment variable
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for generation (0.0 = deterministic)
    pub temperature: f32,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "llama3:latest".to_string(),
            api_base: None,
            api_key: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.0,
        }
    }
}

// =============================================================================
// Transform Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformSettings {
    /// Model override for this transform
    #[serde(default)]
    pub model: Option<String>,

    /// Maximum generated tokens per chunk
    pub max_length: usize,
}

impl TransformSettings {
    pub fn new(max_length: usize) -> Self {
        Self {
            model: None,
            max_length,
        }
    }
}

// =============================================================================
// Pipeline Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Whitespace-word budget per chunk (0 = one chunk per sentence)
    pub max_chunk_words: usize,

    /// Maximum flashcards per run
    pub num_flashcards: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_words: pipeline::DEFAULT_MAX_CHUNK_WORDS,
            num_flashcards: pipeline::DEFAULT_NUM_FLASHCARDS,
        }
    }
}

// =============================================================================
// Tokenizer Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Directory holding tokenizer resources (default: ~/.local/share/studybuddy)
    pub data_dir: Option<PathBuf>,
}

impl TokenizerConfig {
    /// Configured data directory, else the global data directory
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(super::ConfigLoader::global_data_dir)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.simplify.max_length, 512);
        assert_eq!(config.summarize.max_length, 142);
        assert_eq!(config.pipeline.max_chunk_words, 300);
        assert_eq!(config.pipeline.num_flashcards, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.llm.temperature = 2.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.summarize.max_length = 0;
        assert!(matches!(config.validate(), Err(StudyError::Config(_))));
    }

    #[test]
    fn test_zero_chunk_budget_is_valid() {
        let mut config = Config::default();
        config.pipeline.max_chunk_words = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_config_applies_model_override() {
        let mut config = Config::default();
        config.summarize.model = Some("bart".to_string());

        let summarize = config.provider_config(TransformKind::Summarize);
        let simplify = config.provider_config(TransformKind::Simplify);

        assert_eq!(summarize.model.as_deref(), Some("bart"));
        assert_eq!(simplify.model.as_deref(), Some("llama3:latest"));
        assert_eq!(simplify.provider, "ollama");
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = Config::default();
        config.simplify.model = Some("t5".to_string());

        config.apply_overrides(&ConfigOverrides {
            provider: Some("openai".to_string()),
            model: Some("gpt-4o-mini".to_string()),
            max_chunk_words: Some(50),
            num_flashcards: Some(0),
        });

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(
            config.provider_config(TransformKind::Simplify).model.as_deref(),
            Some("gpt-4o-mini")
        );
        assert_eq!(config.pipeline.max_chunk_words, 50);
        assert_eq!(config.pipeline.num_flashcards, 0);
    }

    #[test]
    fn test_api_key_hidden() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".to_string());

        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("sk-secret"));
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = TokenizerConfig {
            data_dir: Some(PathBuf::from("/tmp/punkt-data")),
        };
        assert_eq!(
            config.resolved_data_dir(),
            Some(PathBuf::from("/tmp/punkt-data"))
        );
    }
}
