//! Study Pipeline
//!
//! One user action runs the whole pipeline:
//! 1. Reject blank input before any stage runs
//! 2. Simplify the input chunk by chunk
//! 3. Summarize the input chunk by chunk
//! 4. Build quiz items from the input and flashcards from the summary
//! 5. Count words of input, simplified text and summary
//!
//! Stages run in that order; a transform failure aborts the run.

use std::sync::Arc;

use tracing::{debug, info};

use super::flashcards::generate_flashcards;
use super::orchestrator::transform_long;
use super::quiz::generate_quiz;
use crate::ai::{ModelCache, SharedTransform};
use crate::config::{Config, PipelineConfig};
use crate::text::{PunktTokenizer, SharedTokenizer, TokenizerResources};
use crate::types::{Result, StudyAids, StudyError, TransformKind, WordCounts};

/// Tokenizer, transforms and settings for producing [`StudyAids`]
pub struct StudyPipeline {
    tokenizer: SharedTokenizer,
    simplifier: SharedTransform,
    summarizer: SharedTransform,
    settings: PipelineConfig,
}

impl StudyPipeline {
    pub fn new(
        tokenizer: SharedTokenizer,
        simplifier: SharedTransform,
        summarizer: SharedTransform,
        settings: PipelineConfig,
    ) -> Self {
        Self {
            tokenizer,
            simplifier,
            summarizer,
            settings,
        }
    }

    /// Build from configuration, loading transforms through `cache`.
    ///
    /// Tokenizer resources are loaded (and acquired if missing) here, so a
    /// resource failure surfaces before any text is processed.
    pub async fn from_config(config: &Config, cache: &ModelCache) -> Result<Self> {
        let resources = match config.tokenizer.resolved_data_dir() {
            Some(dir) => TokenizerResources::load(&dir)?,
            None => {
                debug!("No data directory available, using bundled tokenizer resources");
                TokenizerResources::bundled()
            }
        };
        let tokenizer: SharedTokenizer = Arc::new(PunktTokenizer::new(resources));

        let simplifier = cache
            .simplifier(
                &config.provider_config(TransformKind::Simplify),
                config.simplify.max_length,
            )
            .await?;
        let summarizer = cache
            .summarizer(
                &config.provider_config(TransformKind::Summarize),
                config.summarize.max_length,
            )
            .await?;

        Ok(Self::new(
            tokenizer,
            simplifier,
            summarizer,
            config.pipeline.clone(),
        ))
    }

    pub fn settings(&self) -> &PipelineConfig {
        &self.settings
    }

    /// Produce every study aid for `input`
    pub async fn run(&self, input: &str) -> Result<StudyAids> {
        if input.trim().is_empty() {
            return Err(StudyError::EmptyInput);
        }

        let tokenizer = self.tokenizer.as_ref();
        let max_words = self.settings.max_chunk_words;

        let simplified =
            transform_long(tokenizer, input, self.simplifier.as_ref(), max_words).await?;
        let summary = transform_long(tokenizer, input, self.summarizer.as_ref(), max_words).await?;

        let quiz = generate_quiz(tokenizer, input);
        let flashcards = generate_flashcards(tokenizer, &summary, self.settings.num_flashcards);

        let word_counts = WordCounts {
            input: tokenizer.count_words(input),
            simplified: tokenizer.count_words(&simplified),
            summary: tokenizer.count_words(&summary),
        };

        info!(
            "Generated {} quiz item(s) and {} flashcard(s) from {} words",
            quiz.len(),
            flashcards.len(),
            word_counts.input
        );

        Ok(StudyAids {
            simplified,
            summary,
            quiz,
            flashcards,
            word_counts,
        })
    }
}
