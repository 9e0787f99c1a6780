//! Process-Wide Transform Cache
//!
//! Building a transform means constructing its provider (HTTP client, key
//! lookup, endpoint validation). [`ModelCache`] does that once per transform
//! kind and hands out the same [`Arc`] afterwards. The first successful load
//! wins: later calls with a different configuration get the cached handle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use tokio::sync::OnceCell;
use tracing::info;

use super::provider::{ProviderConfig, create_provider};
use super::transform::{Simplifier, Summarizer, Transform};
use crate::types::{Result, StudyError, TransformKind};

/// Shared transform handle
pub type SharedTransform = Arc<dyn Transform>;

static GLOBAL_CACHE: LazyLock<ModelCache> = LazyLock::new(ModelCache::new);

/// At most one loaded transform per [`TransformKind`]
#[derive(Default)]
pub struct ModelCache {
    simplifier: OnceCell<SharedTransform>,
    summarizer: OnceCell<SharedTransform>,
    loads: AtomicUsize,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache shared by the whole process
    pub fn global() -> &'static ModelCache {
        &GLOBAL_CACHE
    }

    fn cell(&self, kind: TransformKind) -> &OnceCell<SharedTransform> {
        match kind {
            TransformKind::Simplify => &self.simplifier,
            TransformKind::Summarize => &self.summarizer,
        }
    }

    /// Cached transform for `kind`, running `load` only if none is cached.
    ///
    /// A failed load leaves the slot empty so the next call tries again.
    pub async fn get_or_load<F>(&self, kind: TransformKind, load: F) -> Result<SharedTransform>
    where
        F: FnOnce() -> Result<SharedTransform>,
    {
        self.cell(kind)
            .get_or_try_init(|| async move {
                let transform = load()?;
                self.loads.fetch_add(1, Ordering::Relaxed);
                info!("Loaded {} transform", kind);
                Ok::<_, StudyError>(transform)
            })
            .await
            .map(Arc::clone)
    }

    /// Simplifier backed by the provider described in `config`
    pub async fn simplifier(
        &self,
        config: &ProviderConfig,
        max_length: usize,
    ) -> Result<SharedTransform> {
        self.get_or_load(TransformKind::Simplify, || {
            let provider = create_provider(config)?;
            Ok(Arc::new(Simplifier::with_max_length(provider, max_length)) as SharedTransform)
        })
        .await
    }

    /// Summarizer backed by the provider described in `config`
    pub async fn summarizer(
        &self,
        config: &ProviderConfig,
        max_length: usize,
    ) -> Result<SharedTransform> {
        self.get_or_load(TransformKind::Summarize, || {
            let provider = create_provider(config)?;
            Ok(Arc::new(Summarizer::with_max_length(provider, max_length)) as SharedTransform)
        })
        .await
    }

    pub fn is_loaded(&self, kind: TransformKind) -> bool {
        self.cell(kind).initialized()
    }

    /// Number of successful loads since creation
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Echo(TransformKind);

    #[async_trait]
    impl Transform for Echo {
        fn kind(&self) -> TransformKind {
            self.0
        }

        async fn apply(&self, chunk: &str) -> Result<String> {
            Ok(chunk.to_string())
        }
    }

    fn echo(kind: TransformKind) -> Result<SharedTransform> {
        Ok(Arc::new(Echo(kind)))
    }

    #[tokio::test]
    async fn test_loads_each_kind_once() {
        let cache = ModelCache::new();

        let first = cache
            .get_or_load(TransformKind::Simplify, || echo(TransformKind::Simplify))
            .await
            .unwrap();
        let second = cache
            .get_or_load(TransformKind::Simplify, || panic!("loaded twice"))
            .await
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
        assert!(cache.is_loaded(TransformKind::Simplify));
        assert!(!cache.is_loaded(TransformKind::Summarize));
    }

    #[tokio::test]
    async fn test_kinds_are_cached_separately() {
        let cache = ModelCache::new();

        let simplify = cache
            .get_or_load(TransformKind::Simplify, || echo(TransformKind::Simplify))
            .await
            .unwrap();
        let summarize = cache
            .get_or_load(TransformKind::Summarize, || echo(TransformKind::Summarize))
            .await
            .unwrap();

        assert_eq!(simplify.kind(), TransformKind::Simplify);
        assert_eq!(summarize.kind(), TransformKind::Summarize);
        assert_eq!(cache.loads(), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = ModelCache::new();

        let err = cache
            .get_or_load(TransformKind::Summarize, || {
                Err(StudyError::Config("no provider".to_string()))
            })
            .await;
        assert!(err.is_err());
        assert!(!cache.is_loaded(TransformKind::Summarize));

        cache
            .get_or_load(TransformKind::Summarize, || echo(TransformKind::Summarize))
            .await
            .unwrap();
        assert_eq!(cache.loads(), 1);
    }

    #[tokio::test]
    async fn test_simplifier_from_provider_config() {
        let cache = ModelCache::new();
        let config = ProviderConfig::default();

        let first = cache.simplifier(&config, 512).await.unwrap();
        let second = cache.simplifier(&config, 64).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.kind(), TransformKind::Simplify);
    }

    #[tokio::test]
    async fn test_unknown_provider_fails_load() {
        let cache = ModelCache::new();
        let config = ProviderConfig {
            provider: "nope".to_string(),
            ..Default::default()
        };

        assert!(cache.summarizer(&config, 142).await.is_err());
        assert_eq!(cache.loads(), 0);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(ModelCache::global(), ModelCache::global()));
    }
}
