//! Length-targeted summarization with memoization.
//!
//! [`Summarizer`] owns the lazily-initialized generative capability and a
//! bounded LRU cache of raw generations keyed by `(text, max_tokens)`.
//! Targets that map to the same token budget (every line-count target does)
//! share one generation.

use moka::future::Cache;
use moka::policy::EvictionPolicy;

use crate::generate::{GenerationParams, LazyGenerator};
use crate::target::SummaryTarget;
use crate::{GistError, Result};

/// Default number of cached generations.
pub const DEFAULT_CACHE_CAPACITY: u64 = 128;

/// Memoization key: exact source text and the derived maximum token budget.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationKey {
    pub text: String,
    pub max_tokens: usize,
}

/// Generates raw summaries for a source text and a target.
pub struct Summarizer {
    generator: LazyGenerator,
    cache: Cache<GenerationKey, String>,
}

impl Summarizer {
    /// Creates a summarizer holding at most `cache_capacity` generations.
    pub fn new(generator: LazyGenerator, cache_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(cache_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { generator, cache }
    }

    /// Returns the raw generated summary of `text` sized for `target`.
    ///
    /// A cache hit returns the stored string without touching the model.
    /// Concurrent misses on the same key share one generation; failures are
    /// not cached.
    ///
    /// # Errors
    ///
    /// [`GistError::CapabilityUnavailable`] when the model cannot be loaded,
    /// [`GistError::Generation`] when a generation call fails.
    pub async fn summarize(&self, text: &str, target: SummaryTarget) -> Result<String> {
        let budget = target.token_budget();
        let key = GenerationKey { text: text.to_string(), max_tokens: budget.max_tokens };

        let entry = self
            .cache
            .entry(key)
            .or_try_insert_with(async {
                let generator = self.generator.get().await?;
                let params = GenerationParams::for_budget(budget);
                generator.generate(text, &params).await
            })
            .await
            .map_err(|e| GistError::clone(&e))?;

        if entry.is_fresh() {
            tracing::debug!(summary_target = %target, max_tokens = budget.max_tokens, "generated summary");
        } else {
            tracing::debug!(summary_target = %target, max_tokens = budget.max_tokens, "summary cache hit");
        }

        Ok(entry.into_value())
    }

    /// Whether the generative capability has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.generator.is_loaded()
    }

    /// Approximate number of cached generations.
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Applies pending cache maintenance (evictions, counters).
    pub async fn sync_cache(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{GenerationParams, Generator, GeneratorFactory};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        calls: Arc<AtomicUsize>,
        fail_first: bool,
    }

    #[async_trait]
    impl Generator for Scripted {
        async fn generate(&self, text: &str, params: &GenerationParams) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && n == 0 {
                return Err(GistError::Generation("transient".to_string()));
            }
            Ok(format!("{}자 요약: {}. 두 번째 문장.", params.max_length, text.chars().count()))
        }
    }

    struct Ready(Arc<dyn Generator>);

    #[async_trait]
    impl GeneratorFactory for Ready {
        async fn load(&self) -> Result<Arc<dyn Generator>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    #[async_trait]
    impl GeneratorFactory for Broken {
        async fn load(&self) -> Result<Arc<dyn Generator>> {
            Err(GistError::CapabilityUnavailable("tokenizer missing".to_string()))
        }
    }

    fn summarizer(capacity: u64, fail_first: bool) -> (Summarizer, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let generator = Arc::new(Scripted { calls: calls.clone(), fail_first });
        (Summarizer::new(LazyGenerator::new(Ready(generator)), capacity), calls)
    }

    #[tokio::test]
    async fn test_identical_requests_hit_cache() {
        let (summarizer, calls) = summarizer(DEFAULT_CACHE_CAPACITY, false);
        let text = "기사 본문".repeat(100);

        let first = summarizer.summarize(&text, SummaryTarget::ByChars(100)).await.unwrap();
        let second = summarizer.summarize(&text, SummaryTarget::ByChars(100)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(first.starts_with("200자"));
    }

    #[tokio::test]
    async fn test_budget_is_part_of_key() {
        let (summarizer, calls) = summarizer(DEFAULT_CACHE_CAPACITY, false);

        summarizer.summarize("본문", SummaryTarget::ByChars(100)).await.unwrap();
        summarizer.summarize("본문", SummaryTarget::ByChars(200)).await.unwrap();
        summarizer.summarize("다른 본문", SummaryTarget::ByChars(100)).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_line_targets_share_one_generation() {
        let (summarizer, calls) = summarizer(DEFAULT_CACHE_CAPACITY, false);

        let a = summarizer.summarize("본문", SummaryTarget::ByLines(3)).await.unwrap();
        let b = summarizer.summarize("본문", SummaryTarget::ByLines(8)).await.unwrap();

        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (summarizer, calls) = summarizer(DEFAULT_CACHE_CAPACITY, true);

        let first = summarizer.summarize("본문", SummaryTarget::ByChars(100)).await;
        assert!(matches!(first, Err(GistError::Generation(_))));

        assert!(summarizer.summarize("본문", SummaryTarget::ByChars(100)).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_capability_unavailable_propagates() {
        let summarizer = Summarizer::new(LazyGenerator::new(Broken), 8);
        let result = summarizer.summarize("본문", SummaryTarget::ByChars(100)).await;
        assert!(matches!(result, Err(GistError::CapabilityUnavailable(_))));
        assert!(!summarizer.is_loaded());
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let (summarizer, _calls) = summarizer(2, false);
        for i in 0..6 {
            summarizer.summarize(&format!("본문 {i}"), SummaryTarget::ByChars(100)).await.unwrap();
        }
        summarizer.sync_cache().await;
        assert!(summarizer.cached_entries() <= 2);
    }
}
