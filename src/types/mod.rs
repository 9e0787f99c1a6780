pub mod error;
pub mod study;

pub use error::{ErrorCategory, ErrorClassifier, LlmError, Result, StudyError};
pub use study::{Chunk, Flashcard, QuizItem, StudyAids, TransformKind, WordCounts};
