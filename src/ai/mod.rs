//! AI Integration Layer
//!
//! Generative providers, the simplify/summarize transforms built on them, and
//! the process-wide cache of loaded transforms.

pub mod cache;
pub mod provider;
pub mod transform;

pub use cache::{ModelCache, SharedTransform};
pub use provider::{
    GenerationOutput, GenerationRequest, LlmProvider, OllamaProvider, OpenAiProvider,
    ProviderConfig, ResponseMetadata, ResponseTiming, SharedProvider, TokenUsage,
    create_provider,
};
pub use transform::{GeneratedText, Simplifier, SummaryText, Summarizer, Transform};
