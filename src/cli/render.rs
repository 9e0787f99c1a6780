//! Study Aid Rendering
//!
//! Walks [`StudyAids`] in display order: input word count, simplified text,
//! summary, quiz questions, flashcards. Answers are either printed inline or
//! held back until the user presses Enter.

use std::fmt::Write as _;
use std::io;

use console::Term;

use super::ui::Output;
use crate::types::StudyAids;

const REVEAL_PROMPT: &str = "   Press Enter to show answer";

/// One displayable element of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Section(&'static str),
    Text(&'a str),
    WordCount(usize),
    Question(String),
    Answer(&'a str),
    Empty(&'static str),
}

/// Feed every line of the report to `emit`, in order
pub fn walk<'a, F>(aids: &'a StudyAids, mut emit: F) -> io::Result<()>
where
    F: FnMut(Line<'a>) -> io::Result<()>,
{
    emit(Line::Section("Input"))?;
    emit(Line::WordCount(aids.word_counts.input))?;

    emit(Line::Section("Simplified Text"))?;
    emit(Line::Text(&aids.simplified))?;
    emit(Line::WordCount(aids.word_counts.simplified))?;

    emit(Line::Section("Summary"))?;
    emit(Line::Text(&aids.summary))?;
    emit(Line::WordCount(aids.word_counts.summary))?;

    emit(Line::Section("Quiz Questions"))?;
    if aids.quiz.is_empty() {
        emit(Line::Empty("No sentences long enough for quiz questions."))?;
    }
    for (index, item) in aids.quiz.iter().enumerate() {
        emit(Line::Question(format!("Q{}: {}", index + 1, item.question)))?;
        emit(Line::Answer(&item.answer))?;
    }

    emit(Line::Section("Flashcards"))?;
    if aids.flashcards.is_empty() {
        emit(Line::Empty("No flashcards could be built from the summary."))?;
    }
    for (index, card) in aids.flashcards.iter().enumerate() {
        emit(Line::Question(format!("Card {}: {}", index + 1, card.question)))?;
        emit(Line::Answer(&card.answer))?;
    }

    Ok(())
}

/// Unstyled report with answers inline
pub fn render_plain(aids: &StudyAids) -> String {
    let mut out = String::new();
    // writing into a String can't fail
    let _ = walk(aids, |line| {
        let _ = match line {
            Line::Section(title) => writeln!(out, "\n## {}", title),
            Line::Text(text) => writeln!(out, "{}", text),
            Line::WordCount(count) => writeln!(out, "Word count: {}", count),
            Line::Question(question) => writeln!(out, "{}", question),
            Line::Answer(answer) => writeln!(out, "   Answer: {}", answer),
            Line::Empty(note) => writeln!(out, "{}", note),
        };
        Ok(())
    });
    out
}

/// Terminal renderer for the text report
pub struct StudyRenderer {
    term: Term,
    output: Output,
    prompt_for_answers: bool,
}

impl StudyRenderer {
    /// Answers are hidden behind a prompt only on an interactive terminal
    /// and when `reveal` is off.
    pub fn new(reveal: bool) -> Self {
        let term = Term::stdout();
        let prompt_for_answers = !reveal && term.is_term();
        Self {
            term,
            output: Output::new(),
            prompt_for_answers,
        }
    }

    pub fn render(&self, aids: &StudyAids) -> io::Result<()> {
        self.output.header("Study Aids");

        walk(aids, |line| {
            match line {
                Line::Section(title) => self.output.section(title),
                Line::Text(text) => println!("{}", text),
                Line::WordCount(count) => self.output.field("Word count", count),
                Line::Question(question) => println!("{}", question),
                Line::Answer(answer) => self.reveal(answer)?,
                Line::Empty(note) => self.output.info(note),
            }
            Ok(())
        })
    }

    fn reveal(&self, answer: &str) -> io::Result<()> {
        if self.prompt_for_answers {
            self.term.write_str(REVEAL_PROMPT)?;
            self.term.read_line()?;
            self.term.clear_last_lines(1)?;
        }
        self.output.answer(answer);
        Ok(())
    }
}
