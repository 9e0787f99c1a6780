//! Sentence and Word Tokenization
//!
//! The pipeline only depends on the [`Tokenizer`] trait: an ordered list of
//! sentences for a text and an ordered list of word tokens for a string.
//!
//! [`PunktTokenizer`] is the built-in implementation:
//! - Sentences end at `.`, `!` or `?` (plus closing quotes/brackets) followed
//!   by whitespace, except after abbreviations and initials.
//! - Words follow Unicode word boundaries with Treebank conventions: punctuation
//!   is its own token, clitics are split (`do` + `n't`), double quotes become
//!   ``` `` ``` and `''`.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::resources::TokenizerResources;
use crate::types::Result;

/// Terminal punctuation, optional closers, then whitespace or end of text
static SENTENCE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]+["'”’)\]]*(?:\s+|$)"#).unwrap());

/// Dotted forms like `U.S` or `e.g` (trailing period already removed)
static DOTTED_ABBREVIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\p{L}\.)+\p{L}$").unwrap());

const CLITICS: &[&str] = &["'s", "'re", "'ll", "'ve", "'d", "'m"];

const OPENERS: &[char] = &['(', '[', '"', '\'', '“', '‘'];

/// Capitalised words that almost always open a new sentence
const SENTENCE_STARTERS: &[&str] = &[
    "A", "An", "The", "This", "That", "These", "Those", "It", "Its", "I", "We", "You", "He",
    "She", "They", "There", "Then", "But", "And", "So", "If", "When", "In", "On", "At", "For",
    "After", "Before", "However", "Also", "Nobody", "Everyone",
];

/// Sentence and word segmentation service
pub trait Tokenizer: Send + Sync {
    /// Sentences in document order, trimmed, never empty
    fn sentences(&self, text: &str) -> Vec<String>;

    /// Word-level tokens in order; punctuation may be separate tokens
    fn words(&self, text: &str) -> Vec<String>;

    /// Number of word tokens across all sentences of `text`
    fn count_words(&self, text: &str) -> usize {
        self.sentences(text)
            .iter()
            .map(|sentence| self.words(sentence).len())
            .sum()
    }
}

/// Shared tokenizer handle
pub type SharedTokenizer = Arc<dyn Tokenizer>;

/// Rule-based sentence splitter and Treebank-style word tokenizer
#[derive(Debug, Clone, Default)]
pub struct PunktTokenizer {
    resources: TokenizerResources,
}

impl PunktTokenizer {
    pub fn new(resources: TokenizerResources) -> Self {
        Self { resources }
    }

    /// Tokenizer using resources from `data_dir`, acquiring them if missing
    pub fn from_data_dir(data_dir: &Path) -> Result<Self> {
        Ok(Self::new(TokenizerResources::load(data_dir)?))
    }

    /// Whether a `.` between `before` and `after` belongs to an abbreviation
    /// or an initial instead of ending the sentence
    fn is_non_boundary(&self, before: &str, after: &str) -> bool {
        let mut previous_words = before.split_whitespace().rev();
        let Some(word) = previous_words.next() else {
            return false;
        };
        let word = word.trim_start_matches(OPENERS);
        let bare = word.trim_end_matches('.');

        if bare.is_empty() {
            return false;
        }

        if self.resources.is_abbreviation(bare) || DOTTED_ABBREVIATION_RE.is_match(bare) {
            return true;
        }

        let next = after
            .split_whitespace()
            .next()
            .map(|w| w.trim_start_matches(OPENERS));
        is_initial(bare) && continues_name(previous_words.next(), next)
    }
}

/// Uppercase single letter other than the pronoun `I`
fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase() && c != 'I')
}

/// Orthographic check around a candidate initial: the run goes on when the
/// next word is another initial, or a capitalised name that is not a common
/// sentence starter and the initial itself follows a name, an initial or
/// nothing at all (`vitamin C. Lemons` splits, `John F. Kennedy` does not)
fn continues_name(previous: Option<&str>, next: Option<&str>) -> bool {
    let Some(next) = next else {
        return false;
    };
    if next.strip_suffix('.').is_some_and(is_initial) {
        return true;
    }

    let next_capitalised = next.chars().next().is_some_and(char::is_uppercase);
    let next_word = next.trim_end_matches(|c: char| !c.is_alphanumeric());
    let previous_in_name = previous.is_none_or(|word| {
        let word = word.trim_start_matches(OPENERS);
        word.chars().next().is_some_and(char::is_uppercase)
    });

    next_capitalised && previous_in_name && !SENTENCE_STARTERS.contains(&next_word)
}

impl Tokenizer for PunktTokenizer {
    fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in SENTENCE_BOUNDARY_RE.find_iter(text) {
            let punct = boundary.as_str().trim_end();
            let sentence_end = boundary.start() + punct.len();

            let single_period = punct.trim_end_matches(['"', '\'', '”', '’', ')', ']']) == ".";
            if single_period
                && boundary.end() < text.len()
                && self.is_non_boundary(&text[start..boundary.start()], &text[boundary.end()..])
            {
                continue;
            }

            let sentence = text[start..sentence_end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = boundary.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        sentences
    }

    fn words(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let mut after_space = true;
        // '-' glued to the previous word, waiting to see what follows
        let mut pending_hyphen = false;

        for segment in text.split_word_bounds() {
            if segment.trim().is_empty() {
                if pending_hyphen {
                    tokens.push("-".to_string());
                    pending_hyphen = false;
                }
                after_space = true;
                continue;
            }

            if pending_hyphen {
                pending_hyphen = false;
                if is_word(segment) {
                    if let Some(last) = tokens.last_mut() {
                        last.push('-');
                        last.push_str(segment);
                    }
                    after_space = false;
                    continue;
                }
                tokens.push("-".to_string());
            }

            let previous = tokens.last().map(String::as_str);

            if segment == "-" && !after_space && previous.is_some_and(is_word) {
                pending_hyphen = true;
            } else if segment == "."
                && !after_space
                && previous.is_some_and(|t| t.chars().all(|c| c == '.'))
            {
                if let Some(last) = tokens.last_mut() {
                    last.push('.');
                }
            } else if segment == "\"" || segment == "“" || segment == "”" {
                let opening = segment == "“"
                    || (segment == "\""
                        && (after_space || matches!(previous, Some("(" | "[" | "{" | "``"))));
                tokens.push(if opening { "``" } else { "''" }.to_string());
            } else {
                push_with_clitics(&mut tokens, segment);
            }

            after_space = false;
        }

        if pending_hyphen {
            tokens.push("-".to_string());
        }

        tokens
    }
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

/// Push `segment`, splitting English clitics off the stem
fn push_with_clitics(tokens: &mut Vec<String>, segment: &str) {
    let normalized = segment.replace('’', "'").to_lowercase();

    let clitic_len = if normalized.ends_with("n't") && normalized.len() > 3 {
        Some(3)
    } else {
        CLITICS
            .iter()
            .find(|c| normalized.ends_with(*c) && normalized.len() > c.len())
            .map(|c| c.len())
    };

    match clitic_len {
        Some(len) => {
            // Counted in chars: the apostrophe may be the multi-byte '’'
            let split_at = segment
                .char_indices()
                .rev()
                .nth(len - 1)
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            let (stem, clitic) = segment.split_at(split_at);
            if stem.is_empty() {
                tokens.push(segment.to_string());
            } else {
                tokens.push(stem.to_string());
                tokens.push(clitic.to_string());
            }
        }
        None => tokens.push(segment.to_string()),
    }
}

/// Python-style `istitle`: uppercase only after uncased characters, lowercase
/// only after cased ones, and at least one cased character
pub fn is_title_case(token: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;

    for c in token.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }

    cased
}

/// Non-empty and made only of alphabetic characters
pub fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}
