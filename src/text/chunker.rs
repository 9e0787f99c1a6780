//! Word-Budgeted Chunking
//!
//! Splits long input into sentence-aligned chunks that fit a transform's input
//! budget. Sentence boundaries are never crossed: a sentence longer than the
//! budget becomes its own oversized chunk.
//!
//! The budget uses whitespace word counts, a cheaper and coarser measure than
//! the tokenizer's word list.

use tracing::debug;

use super::tokenizer::Tokenizer;
use crate::types::Chunk;

/// Whitespace-delimited word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits text into chunks of at most `max_words` whitespace words
pub struct Chunker<'a> {
    tokenizer: &'a dyn Tokenizer,
    max_words: usize,
}

impl<'a> Chunker<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, max_words: usize) -> Self {
        Self {
            tokenizer,
            max_words,
        }
    }

    /// Partition the sentences of `text` into ordered chunks
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current: Option<Chunk> = None;

        for sentence in self.tokenizer.sentences(text) {
            let words = word_count(&sentence);

            match current.as_mut() {
                Some(chunk) if chunk.word_count + words > self.max_words => {
                    let finished = std::mem::replace(chunk, Chunk::seeded(&sentence, words));
                    chunks.push(finished);
                }
                Some(chunk) => chunk.push(&sentence, words),
                None => current = Some(Chunk::seeded(&sentence, words)),
            }
        }

        if let Some(chunk) = current
            && !chunk.is_empty()
        {
            chunks.push(chunk);
        }

        debug!(
            "Chunked {} words into {} chunks (max {} words)",
            word_count(text),
            chunks.len(),
            self.max_words
        );

        chunks
    }
}

/// Convenience wrapper around [`Chunker::chunk`]
pub fn chunk_text(tokenizer: &dyn Tokenizer, text: &str, max_words: usize) -> Vec<Chunk> {
    Chunker::new(tokenizer, max_words).chunk(text)
}
