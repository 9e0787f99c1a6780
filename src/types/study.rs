//! Study Aid Domain Types
//!
//! Everything a single run produces. Values are built fresh per invocation and
//! never persisted.

use serde::{Deserialize, Serialize};

/// Which generative transform a handle or error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Simplify,
    Summarize,
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformKind::Simplify => write!(f, "simplify"),
            TransformKind::Summarize => write!(f, "summarize"),
        }
    }
}

/// A sentence-aligned slice of the input whose word count fits the budget.
///
/// A chunk may exceed the budget only when it holds a single sentence that is
/// larger than the budget on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Sentences joined with single spaces
    pub text: String,
    /// The consecutive sentences that make up this chunk
    pub sentences: Vec<String>,
    /// Whitespace-delimited word count of `text`
    pub word_count: usize,
}

impl Chunk {
    /// Chunk holding a single sentence
    pub fn seeded(sentence: &str, word_count: usize) -> Self {
        Self {
            text: sentence.to_string(),
            sentences: vec![sentence.to_string()],
            word_count,
        }
    }

    /// Append a sentence, separated from the existing text by one space
    pub fn push(&mut self, sentence: &str, word_count: usize) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(sentence);
        self.sentences.push(sentence.to_string());
        self.word_count += word_count;
    }

    /// No sentence text, only whitespace at most
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Fill-in-the-blank question built from the last word of a sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub answer: String,
}

/// Question with one word blanked out, built from the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Tokenizer word counts shown next to each text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCounts {
    pub input: usize,
    pub simplified: usize,
    pub summary: usize,
}

/// Everything handed to the presentation layer after one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyAids {
    pub simplified: String,
    pub summary: String,
    pub quiz: Vec<QuizItem>,
    pub flashcards: Vec<Flashcard>,
    pub word_counts: WordCounts,
}
