use crate::core::cache::RateCache;
use crate::core::currency::{CurrencyPair, RateProvider};
use crate::core::error::LookupError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves conversion rates through a shared [`RateCache`], falling back to
/// the remote provider on a miss or an expired entry.
pub struct RateResolver<P: RateProvider> {
    provider: P,
    cache: Arc<RateCache>,
}

impl<P: RateProvider> RateResolver<P> {
    pub fn new(provider: P, cache: Arc<RateCache>) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &Arc<RateCache> {
        &self.cache
    }

    pub async fn get_rate(&self, from: &str, to: &str) -> Result<f64, LookupError> {
        let pair = CurrencyPair::new(from, to);
        if let Some(rate) = self.cache.get(&pair).await {
            return Ok(rate);
        }

        // The cache lock is released while the provider is awaited.
        let rate = self.provider.fetch(&pair).await.inspect_err(|e| {
            warn!(error = %e, "Rate lookup failed for {}", pair);
        })?;
        debug!("Fetched rate {} for {}", rate, pair);

        self.cache.put(pair, rate).await;
        Ok(rate)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::cache::DEFAULT_VALIDITY;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Deterministic provider serving rates from a table that tests can edit.
    pub(crate) struct MockProvider {
        rates: Mutex<HashMap<CurrencyPair, f64>>,
        pub(crate) call_count: AtomicUsize,
        delay: Option<Duration>,
    }

    impl MockProvider {
        pub(crate) fn new(rates: &[(&str, &str, f64)]) -> Self {
            let rates = rates
                .iter()
                .map(|(from, to, rate)| (CurrencyPair::new(from, to), *rate))
                .collect();
            Self {
                rates: Mutex::new(rates),
                call_count: AtomicUsize::new(0),
                delay: None,
            }
        }

        pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub(crate) fn set_rate(&self, from: &str, to: &str, rate: Option<f64>) {
            let mut rates = self.rates.lock().unwrap();
            let pair = CurrencyPair::new(from, to);
            match rate {
                Some(rate) => rates.insert(pair, rate),
                None => rates.remove(&pair),
            };
        }

        pub(crate) fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn fetch(&self, pair: &CurrencyPair) -> Result<f64, LookupError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let rates = self.rates.lock().unwrap();
            rates
                .get(pair)
                .copied()
                .ok_or_else(|| LookupError::MissingRate { pair: pair.clone() })
        }
    }

    #[async_trait]
    impl RateProvider for Arc<MockProvider> {
        async fn fetch(&self, pair: &CurrencyPair) -> Result<f64, LookupError> {
            self.as_ref().fetch(pair).await
        }
    }

    fn resolver_with(provider: &Arc<MockProvider>) -> RateResolver<Arc<MockProvider>> {
        RateResolver::new(Arc::clone(provider), Arc::new(RateCache::new()))
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let provider = Arc::new(MockProvider::new(&[("usd", "jpy", 110.25)]));
        let resolver = resolver_with(&provider);

        let first = resolver.get_rate("usd", "jpy").await.unwrap();
        let second = resolver.get_rate("usd", "jpy").await.unwrap();

        assert_eq!(first, 110.25);
        assert_eq!(second, first);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let provider = Arc::new(MockProvider::new(&[("usd", "jpy", 110.25)]));
        let resolver = resolver_with(&provider);

        resolver.get_rate("USD", "jpy").await.unwrap();
        resolver.get_rate("usd", "JPY").await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert_eq!(resolver.cache().len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_refreshed() {
        let provider = Arc::new(MockProvider::new(&[("usd", "jpy", 110.25)]));
        let resolver = resolver_with(&provider);
        let pair = CurrencyPair::new("usd", "jpy");

        resolver.get_rate("usd", "jpy").await.unwrap();
        let before = resolver.cache().entry(&pair).await.unwrap();

        provider.set_rate("usd", "jpy", Some(112.0));
        tokio::time::advance(DEFAULT_VALIDITY + Duration::from_secs(1)).await;

        let rate = resolver.get_rate("usd", "jpy").await.unwrap();
        assert_eq!(rate, 112.0);
        assert_eq!(provider.calls(), 2);

        let after = resolver.cache().entry(&pair).await.unwrap();
        assert_eq!(after.rate, 112.0);
        assert!(after.fetched_at > before.fetched_at);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let provider = Arc::new(MockProvider::new(&[]));
        let resolver = resolver_with(&provider);

        assert!(resolver.get_rate("usd", "xyz").await.is_err());
        assert!(resolver.cache().is_empty().await);

        // No memory of the failure: the next call asks the provider again
        provider.set_rate("usd", "xyz", Some(2.0));
        assert_eq!(resolver.get_rate("usd", "xyz").await.unwrap(), 2.0);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_keeps_stale_entry_but_does_not_serve_it() {
        let provider = Arc::new(MockProvider::new(&[("eur", "usd", 1.08)]));
        let resolver = resolver_with(&provider);
        let pair = CurrencyPair::new("eur", "usd");

        resolver.get_rate("eur", "usd").await.unwrap();
        let stale = resolver.cache().entry(&pair).await.unwrap();

        provider.set_rate("eur", "usd", None);
        tokio::time::advance(DEFAULT_VALIDITY).await;

        let result = resolver.get_rate("eur", "usd").await;
        assert!(matches!(result, Err(LookupError::MissingRate { .. })));
        assert_eq!(resolver.cache().entry(&pair).await, Some(stale));

        // Each call after the failure retries the provider
        assert!(resolver.get_rate("eur", "usd").await.is_err());
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookups_of_distinct_pairs_run_concurrently() {
        let provider = Arc::new(
            MockProvider::new(&[("usd", "jpy", 110.0), ("eur", "gbp", 0.85)])
                .with_delay(Duration::from_secs(5)),
        );
        let resolver = resolver_with(&provider);

        let started = tokio::time::Instant::now();
        let (jpy, gbp) = futures::join!(
            resolver.get_rate("usd", "jpy"),
            resolver.get_rate("eur", "gbp")
        );

        assert_eq!(jpy.unwrap(), 110.0);
        assert_eq!(gbp.unwrap(), 0.85);
        // Both waits overlapped: neither held the cache lock while fetching
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(resolver.cache().len().await, 2);
    }
}
