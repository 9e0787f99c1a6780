//! StudyBuddy - Study Aids from Free-Form Notes
//!
//! Takes study text and produces four derived aids: a simplified rewrite, a
//! condensed summary, cloze quiz questions and flashcards.
//!
//! ## Core Features
//!
//! - **Word-Budgeted Chunking**: long input is split on sentence boundaries
//!   into chunks that fit a transform's input budget
//! - **Generative Transforms**: simplify and summarize through Ollama or any
//!   OpenAI-compatible endpoint
//! - **Question Generation**: quiz items and flashcards derived from sentence
//!   structure
//!
//! ## Quick Start
//!
//! ```ignore
//! use studybuddy::{Config, ModelCache, StudyPipeline};
//!
//! let config = Config::default();
//! let pipeline = StudyPipeline::from_config(&config, ModelCache::global()).await?;
//! let aids = pipeline.run("Photosynthesis converts light into chemical energy.").await?;
//! for card in &aids.flashcards {
//!     println!("{} -> {}", card.question, card.answer);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: provider abstraction, simplify/summarize transforms, model cache
//! - [`text`]: sentence/word tokenization and chunking
//! - [`study`]: orchestration, quiz and flashcard generation, the pipeline
//! - [`config`]: layered configuration
//! - [`cli`]: terminal rendering and commands

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod study;
pub mod text;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ConfigOverrides};

// Error Types
pub use types::error::{ErrorCategory, LlmError, Result, StudyError};

// Data Model
pub use types::{Chunk, Flashcard, QuizItem, StudyAids, TransformKind, WordCounts};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use study::{StudyPipeline, generate_flashcards, generate_quiz, transform_long};
pub use text::{Chunker, PunktTokenizer, Tokenizer, chunk_text};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    LlmProvider, ModelCache, ProviderConfig, Simplifier, Summarizer, Transform, create_provider,
};
