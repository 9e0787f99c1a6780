//! Study Aid Generation
//!
//! Chunk-wise transformation of long input, cloze quiz items, flashcards and
//! the pipeline tying them together.

pub mod flashcards;
pub mod orchestrator;
pub mod pipeline;
pub mod quiz;

pub use flashcards::generate_flashcards;
pub use orchestrator::transform_long;
pub use pipeline::StudyPipeline;
pub use quiz::{generate_quiz, quiz_item};
