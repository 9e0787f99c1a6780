//! Chunk-wise transformation of long text.

use tracing::{debug, info};

use crate::ai::Transform;
use crate::text::{Tokenizer, chunk_text};
use crate::types::Result;

/// Apply `transform` to every chunk of `text` and join the outputs with a
/// single space, in chunk order.
///
/// The transform is invoked exactly once per chunk. The first failure is
/// returned as-is and the remaining chunks are not processed.
pub async fn transform_long<T>(
    tokenizer: &dyn Tokenizer,
    text: &str,
    transform: &T,
    max_words: usize,
) -> Result<String>
where
    T: Transform + ?Sized,
{
    let chunks = chunk_text(tokenizer, text, max_words);
    let total = chunks.len();

    info!("Running {} over {} chunk(s)", transform.kind(), total);

    let mut outputs = Vec::with_capacity(total);
    for (index, chunk) in chunks.iter().enumerate() {
        debug!(
            "{} chunk {}/{} ({} words)",
            transform.kind(),
            index + 1,
            total,
            chunk.word_count
        );
        outputs.push(transform.apply(&chunk.text).await?);
    }

    Ok(outputs.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::PunktTokenizer;
    use crate::types::{StudyError, TransformKind};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Uppercases chunks and records what it saw
    #[derive(Default)]
    struct Shout {
        seen: Mutex<Vec<String>>,
        fail_on: Option<usize>,
    }

    impl Shout {
        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transform for Shout {
        fn kind(&self) -> TransformKind {
            TransformKind::Simplify
        }

        async fn apply(&self, chunk: &str) -> Result<String> {
            let mut seen = self.seen.lock().unwrap();
            seen.push(chunk.to_string());
            if self.fail_on == Some(seen.len()) {
                return Err(StudyError::transform(self.kind(), "model crashed"));
            }
            Ok(chunk.to_uppercase())
        }
    }

    #[tokio::test]
    async fn test_one_invocation_per_chunk() {
        let tokenizer = PunktTokenizer::default();
        let transform = Shout::default();
        let text = "One two three. Four five six. Seven.";

        let out = transform_long(&tokenizer, text, &transform, 3).await.unwrap();

        assert_eq!(out, "ONE TWO THREE. FOUR FIVE SIX. SEVEN.");
        assert_eq!(transform.calls(), chunk_text(&tokenizer, text, 3).len());
        assert_eq!(transform.calls(), 3);
    }

    #[tokio::test]
    async fn test_single_chunk_under_budget() {
        let tokenizer = PunktTokenizer::default();
        let transform = Shout::default();

        let out = transform_long(&tokenizer, "Short text. Still short.", &transform, 300)
            .await
            .unwrap();

        assert_eq!(out, "SHORT TEXT. STILL SHORT.");
        assert_eq!(transform.calls(), 1);
    }

    #[tokio::test]
    async fn test_first_failure_stops_processing() {
        let tokenizer = PunktTokenizer::default();
        let transform = Shout {
            fail_on: Some(2),
            ..Default::default()
        };

        let err = transform_long(&tokenizer, "Ab cd. Ef gh. Ij kl.", &transform, 2)
            .await
            .unwrap_err();

        assert!(matches!(err, StudyError::Transform { .. }));
        assert_eq!(transform.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_outputs_keep_their_position() {
        struct Blank;

        #[async_trait]
        impl Transform for Blank {
            fn kind(&self) -> TransformKind {
                TransformKind::Summarize
            }

            async fn apply(&self, _chunk: &str) -> Result<String> {
                Ok(String::new())
            }
        }

        let tokenizer = PunktTokenizer::default();
        let out = transform_long(&tokenizer, "Ab cd. Ef gh.", &Blank, 2)
            .await
            .unwrap();
        assert_eq!(out, " ");
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let tokenizer = PunktTokenizer::default();
        let transform: Box<dyn Transform> = Box::new(Shout::default());

        let out = transform_long(&tokenizer, "Hello there.", transform.as_ref(), 300)
            .await
            .unwrap();
        assert_eq!(out, "HELLO THERE.");
    }

    #[tokio::test]
    async fn test_deterministic_transform_is_idempotent() {
        let tokenizer = PunktTokenizer::default();
        let text = "The first idea. A second idea follows. Then a third.";

        let first = transform_long(&tokenizer, text, &Shout::default(), 4).await.unwrap();
        let second = transform_long(&tokenizer, text, &Shout::default(), 4).await.unwrap();
        assert_eq!(first, second);
    }
}
