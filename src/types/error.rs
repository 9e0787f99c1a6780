//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Categories
//!
//! Provider failures are classified so the user sees *why* a transform failed:
//!
//! - **RateLimit**: API rate limiting
//! - **TokenLimit**: Context too large for the model
//! - **Auth**: Authentication failures
//! - **Network**: Connectivity issues
//! - **Unavailable**: Provider or model not available
//!
//! The pipeline never retries. A classified error is reported and the run ends.

use std::path::PathBuf;
use thiserror::Error;

use super::study::TransformKind;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for provider failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited by the provider
    RateLimit,
    /// Context/token limit exceeded
    TokenLimit,
    /// Authentication failed
    Auth,
    /// Network/connectivity issues
    Network,
    /// Provider or model unavailable
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Provider response could not be parsed
    ParseError,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::TokenLimit => write!(f, "TOKEN_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Hint shown to the user next to the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::RateLimit => Some("the provider is rate limiting requests; try again later"),
            Self::TokenLimit => Some("lower pipeline.max_chunk_words to send smaller chunks"),
            Self::Auth => Some("check llm.api_key or the OPENAI_API_KEY environment variable"),
            Self::Network => Some("check llm.api_base and that the provider is reachable"),
            Self::Unavailable => Some("check that the configured model is installed"),
            _ => None,
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// LLM error with category and provider context
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps raw provider failures onto an [`ErrorCategory`]
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from any provider
    pub fn classify(message: &str, provider: &str) -> LlmError {
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota exceeded")
        {
            return LlmError::with_provider(ErrorCategory::RateLimit, message, provider);
        }

        if lower.contains("token")
            && (lower.contains("limit") || lower.contains("exceed") || lower.contains("maximum"))
            || lower.contains("context length")
            || lower.contains("too large")
        {
            return LlmError::with_provider(ErrorCategory::TokenLimit, message, provider);
        }

        if lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("unauthorized")
        {
            return LlmError::with_provider(ErrorCategory::Auth, message, provider);
        }

        if lower.contains("connect")
            || lower.contains("dns")
            || lower.contains("timed out")
            || lower.contains("timeout")
        {
            return LlmError::with_provider(ErrorCategory::Network, message, provider);
        }

        if lower.contains("not found") || lower.contains("service unavailable") {
            return LlmError::with_provider(ErrorCategory::Unavailable, message, provider);
        }

        if lower.contains("parse") || lower.contains("json") || lower.contains("decod") {
            return LlmError::with_provider(ErrorCategory::ParseError, message, provider);
        }

        LlmError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        match status {
            429 => LlmError::with_provider(ErrorCategory::RateLimit, message, provider),
            401 | 403 => LlmError::with_provider(ErrorCategory::Auth, message, provider),
            400 | 422 => Self::classify_bad_request(message, provider),
            404 => LlmError::with_provider(ErrorCategory::Unavailable, message, provider),
            500 | 502 | 503 | 504 => {
                LlmError::with_provider(ErrorCategory::Transient, message, provider)
            }
            _ => LlmError::with_provider(ErrorCategory::Unknown, message, provider),
        }
    }

    fn classify_bad_request(message: &str, provider: &str) -> LlmError {
        let lower = message.to_lowercase();
        if lower.contains("context length") || lower.contains("maximum context") {
            LlmError::with_provider(ErrorCategory::TokenLimit, message, provider)
        } else {
            LlmError::with_provider(ErrorCategory::BadRequest, message, provider)
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum StudyError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // LLM Errors
    // -------------------------------------------------------------------------
    /// Structured LLM error with category
    #[error("LLM error: {0}")]
    Llm(LlmError),

    /// Simple LLM API error (client construction and similar)
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// A transform produced no usable output
    #[error("{kind} transform failed: {message}")]
    Transform { kind: TransformKind, message: String },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Please enter some study text to proceed.")]
    EmptyInput,

    #[error("Tokenizer resources unavailable at {}: {message}", path.display())]
    TokenizerResources { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<LlmError> for StudyError {
    fn from(err: LlmError) -> Self {
        StudyError::Llm(err)
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;

impl StudyError {
    /// Create a transform error
    pub fn transform(kind: TransformKind, message: impl Into<String>) -> Self {
        Self::Transform {
            kind,
            message: message.into(),
        }
    }

    /// Category of the underlying provider failure, if any
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Llm(e) => Some(e.category),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
