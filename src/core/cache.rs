use crate::core::currency::CurrencyPair;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Rates are reused for an hour after they are fetched.
pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    pub rate: f64,
    pub fetched_at: Instant,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: Instant, validity: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < validity
    }
}

/// In-memory rate cache keyed by currency pair.
///
/// Entries are replaced whole under a single lock, so readers see either the
/// previous entry or the new one. Stale entries are kept until overwritten by a
/// successful refresh; they are never returned by [`RateCache::get`].
pub struct RateCache {
    inner: Mutex<HashMap<CurrencyPair, CacheEntry>>,
    validity: Duration,
}

impl RateCache {
    pub fn new() -> Self {
        Self::with_validity(DEFAULT_VALIDITY)
    }

    pub fn with_validity(validity: Duration) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            validity,
        }
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Returns the cached rate if it is still inside the validity window.
    pub async fn get(&self, pair: &CurrencyPair) -> Option<f64> {
        let cache = self.inner.lock().await;
        match cache.get(pair) {
            Some(entry) if entry.is_fresh(Instant::now(), self.validity) => {
                debug!("Cache HIT for pair: {}", pair);
                Some(entry.rate)
            }
            Some(_) => {
                debug!("Cache entry expired for pair: {}", pair);
                None
            }
            None => {
                debug!("Cache MISS for pair: {}", pair);
                None
            }
        }
    }

    pub async fn put(&self, pair: CurrencyPair, rate: f64) {
        let entry = CacheEntry {
            rate,
            fetched_at: Instant::now(),
        };
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for pair: {}", pair);
        cache.insert(pair, entry);
    }

    /// Raw entry lookup, ignoring freshness.
    pub async fn entry(&self, pair: &CurrencyPair) -> Option<CacheEntry> {
        self.inner.lock().await.get(pair).copied()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_get_put() {
        let cache = RateCache::new();
        let pair = CurrencyPair::new("usd", "jpy");

        // Initially, cache is empty
        assert!(cache.get(&pair).await.is_none());
        assert!(cache.is_empty().await);

        cache.put(pair.clone(), 110.25).await;
        assert_eq!(cache.get(&pair).await, Some(110.25));

        // Reversed pair is a different key
        assert!(cache.get(&CurrencyPair::new("jpy", "usd")).await.is_none());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_entry_expires_after_validity() {
        let cache = RateCache::new();
        let pair = CurrencyPair::new("eur", "usd");
        cache.put(pair.clone(), 1.08).await;

        tokio::time::advance(DEFAULT_VALIDITY - Duration::from_secs(1)).await;
        assert_eq!(cache.get(&pair).await, Some(1.08));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get(&pair).await.is_none());

        // Expired entries are not evicted
        let entry = cache.entry(&pair).await.unwrap();
        assert_eq!(entry.rate, 1.08);
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_overwrites_entry_and_timestamp() {
        let cache = RateCache::with_validity(Duration::from_secs(10));
        assert_eq!(cache.validity(), Duration::from_secs(10));
        let pair = CurrencyPair::new("usd", "inr");
        cache.put(pair.clone(), 83.0).await;
        let first = cache.entry(&pair).await.unwrap();

        tokio::time::advance(Duration::from_secs(30)).await;
        cache.put(pair.clone(), 84.0).await;
        let second = cache.entry(&pair).await.unwrap();

        assert_eq!(second.rate, 84.0);
        assert!(second.fetched_at > first.fetched_at);
        assert_eq!(cache.get(&pair).await, Some(84.0));
    }
}
