//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Chunking and question generation constants
pub mod pipeline {
    /// Default whitespace-word budget per chunk
    pub const DEFAULT_MAX_CHUNK_WORDS: usize = 300;

    /// Default number of flashcards per run
    pub const DEFAULT_NUM_FLASHCARDS: usize = 5;

    /// Blank marker appended to quiz questions
    pub const QUIZ_BLANK: &str = "______";

    /// Blank marker substituted into flashcard questions
    pub const FLASHCARD_BLANK: &str = "__________";

    /// Sentences need more than this many whitespace words to become a quiz item
    pub const QUIZ_MIN_WORDS: usize = 3;

    /// Sentences need more than this many word tokens to become a flashcard
    pub const FLASHCARD_MIN_TOKENS: usize = 4;
}

/// Generative transform constants
pub mod transform {
    /// Task marker prepended to every chunk sent to the simplifier
    pub const SIMPLIFY_PREFIX: &str = "simplify: ";

    /// Maximum generated tokens for simplification
    pub const SIMPLIFY_MAX_LENGTH: usize = 512;

    /// Maximum generated tokens for summarization
    pub const SUMMARIZE_MAX_LENGTH: usize = 142;
}

/// Tokenizer resource constants
pub mod tokenizer {
    /// Sub-directory of the data dir holding sentence splitter data
    pub const RESOURCE_DIR: &str = "punkt";

    /// Abbreviation list file name, one abbreviation per line
    pub const ABBREVIATIONS_FILE: &str = "abbreviations.txt";
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;
}
