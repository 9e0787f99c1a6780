//! Cloze quiz generation from sentence structure.

use crate::constants::pipeline::{QUIZ_BLANK, QUIZ_MIN_WORDS};
use crate::text::Tokenizer;
use crate::types::QuizItem;

/// One quiz item per sentence of `text` with more than three words.
///
/// The last whitespace word is the answer, punctuation included.
pub fn generate_quiz(tokenizer: &dyn Tokenizer, text: &str) -> Vec<QuizItem> {
    tokenizer
        .sentences(text)
        .iter()
        .filter_map(|sentence| quiz_item(sentence))
        .collect()
}

/// Blank out the last word of `sentence`
pub fn quiz_item(sentence: &str) -> Option<QuizItem> {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() <= QUIZ_MIN_WORDS {
        return None;
    }

    let (answer, rest) = words.split_last()?;
    Some(QuizItem {
        question: format!("{} {}", rest.join(" "), QUIZ_BLANK),
        answer: answer.to_string(),
    })
}
