//! Flashcard generation from summary sentences.
//!
//! Each qualifying sentence contributes at most one card: the right-most
//! token that is title-cased or alphabetic becomes the answer, and its first
//! occurrence in the sentence is blanked out. Questions and answers share a
//! single used-set, so a word that was already an answer can't appear as a
//! later answer, and a repeated question is dropped.

use std::collections::HashSet;

use tracing::debug;

use crate::constants::pipeline::{FLASHCARD_BLANK, FLASHCARD_MIN_TOKENS};
use crate::text::{Tokenizer, is_alphabetic, is_title_case};
use crate::types::Flashcard;

/// Up to `num_flashcards` cards from the sentences of `summary`
pub fn generate_flashcards(
    tokenizer: &dyn Tokenizer,
    summary: &str,
    num_flashcards: usize,
) -> Vec<Flashcard> {
    let mut cards = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    for sentence in tokenizer.sentences(summary) {
        if cards.len() >= num_flashcards {
            break;
        }

        let words = tokenizer.words(&sentence);
        if words.len() <= FLASHCARD_MIN_TOKENS {
            continue;
        }

        let Some(answer) = words
            .iter()
            .rev()
            .find(|word| is_title_case(word) || is_alphabetic(word))
        else {
            continue;
        };

        let question = sentence.replacen(answer.as_str(), FLASHCARD_BLANK, 1);
        if used.contains(&question) || used.contains(answer) {
            debug!("Skipping duplicate flashcard for '{}'", answer);
            continue;
        }

        used.insert(question.clone());
        used.insert(answer.clone());
        cards.push(Flashcard {
            question,
            answer: answer.clone(),
        });
    }

    cards
}
