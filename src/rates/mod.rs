//! Cached exchange rates with a TTL and stale-cache fallback

pub mod source;

pub use source::{RateError, RateSource, StaticRateSource, DEFAULT_ENDPOINT};

#[cfg(feature = "http")]
pub use source::HttpRateSource;

use crate::models::RateTable;
use crate::store::KeyValueStore;

/// Page-local cache key holding the serialized rate table.
pub const RATES_KEY: &str = "currencyRates";
/// Page-local cache key holding the fetch timestamp (milliseconds, as text).
pub const FETCH_TIME_KEY: &str = "lastFetchTime";

/// Rate table with freshness tracking.
///
/// `load` is the only refresh path: cached data younger than the TTL is
/// adopted as-is; otherwise one fetch attempt is made, and on failure any
/// cached table, even a stale one, is used instead. With no table loaded all
/// conversion operations are no-ops.
pub struct RateCache {
    store: Box<dyn KeyValueStore>,
    source: Box<dyn RateSource>,
    base: String,
    ttl_ms: u64,
    table: Option<RateTable>,
}

impl RateCache {
    pub fn new(
        store: Box<dyn KeyValueStore>,
        source: Box<dyn RateSource>,
        base: impl Into<String>,
        ttl_ms: u64,
    ) -> Self {
        Self {
            store,
            source,
            base: base.into(),
            ttl_ms,
            table: None,
        }
    }

    pub fn table(&self) -> Option<&RateTable> {
        self.table.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Loads rates, preferring fresh cache, then the remote source, then
    /// stale cache. Failures are logged, never propagated.
    pub fn load(&mut self, now_ms: u64) {
        if let Some(cached) = self.cached_table() {
            if let Some(fetched_at) = self.last_fetch_ms() {
                if now_ms.saturating_sub(fetched_at) < self.ttl_ms {
                    self.table = Some(cached);
                    return;
                }
            }
        }

        match self.source.fetch(&self.base) {
            Ok(table) => {
                self.persist(&table, now_ms);
                self.table = Some(table);
            }
            Err(e) => {
                tracing::warn!("rate fetch failed, falling back to cache: {e}");
                self.table = self.cached_table();
            }
        }
    }

    fn cached_table(&self) -> Option<RateTable> {
        let raw = self.store.get(RATES_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::warn!("discarding unreadable cached rates: {e}");
                None
            }
        }
    }

    fn last_fetch_ms(&self) -> Option<u64> {
        self.store.get(FETCH_TIME_KEY)?.parse().ok()
    }

    fn persist(&mut self, table: &RateTable, now_ms: u64) {
        match serde_json::to_string(table) {
            Ok(serialized) => {
                self.store.set(RATES_KEY, &serialized);
                self.store.set(FETCH_TIME_KEY, &now_ms.to_string());
            }
            Err(e) => tracing::warn!("failed to serialize rates for caching: {e}"),
        }
    }

    #[cfg(test)]
    fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const DAY_MS: u64 = 24 * 60 * 60 * 1000;

    struct FailingSource;

    impl RateSource for FailingSource {
        fn fetch(&self, _base: &str) -> Result<RateTable, RateError> {
            Err(RateError::Request("connection refused".to_string()))
        }
    }

    fn sample_table() -> RateTable {
        [("USD".to_string(), 1.0), ("EUR".to_string(), 0.9)]
            .into_iter()
            .collect()
    }

    fn seeded_store(table: &RateTable, fetched_at: u64) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(RATES_KEY, &serde_json::to_string(table).unwrap());
        store.set(FETCH_TIME_KEY, &fetched_at.to_string());
        store
    }

    #[test]
    fn test_fresh_cache_skips_fetch() {
        let store = seeded_store(&sample_table(), 1_000);
        // source would fail if consulted
        let mut cache = RateCache::new(Box::new(store), Box::new(FailingSource), "USD", DAY_MS);
        cache.load(2_000);
        assert_eq!(cache.table(), Some(&sample_table()));
    }

    #[test]
    fn test_stale_cache_fetches_and_persists() {
        let store = seeded_store(&sample_table(), 0);
        let mut fresh = sample_table();
        fresh.insert("GBP", 0.78);
        let mut cache = RateCache::new(
            Box::new(store),
            Box::new(StaticRateSource::new(fresh.clone())),
            "USD",
            DAY_MS,
        );
        cache.load(DAY_MS + 1);
        assert_eq!(cache.table(), Some(&fresh));
    }

    #[test]
    fn test_stale_cache_fallback_on_fetch_failure() {
        let store = seeded_store(&sample_table(), 0);
        let mut cache = RateCache::new(Box::new(store), Box::new(FailingSource), "USD", DAY_MS);
        cache.load(DAY_MS * 10);
        // stale table still adopted rather than leaving rates unset
        assert_eq!(cache.table(), Some(&sample_table()));
    }

    #[test]
    fn test_no_cache_and_failing_fetch_leaves_unset() {
        let mut cache = RateCache::new(
            Box::new(MemoryStore::new()),
            Box::new(FailingSource),
            "USD",
            DAY_MS,
        );
        cache.load(0);
        assert!(!cache.is_loaded());
    }

    #[test]
    fn test_successful_fetch_writes_cache_keys() {
        let mut cache = RateCache::new(
            Box::new(MemoryStore::new()),
            Box::new(StaticRateSource::new(sample_table())),
            "USD",
            DAY_MS,
        );
        cache.load(5_000);
        assert!(cache.is_loaded());
        assert_eq!(
            cache.store().get(RATES_KEY),
            Some(serde_json::to_string(&sample_table()).unwrap())
        );
        assert_eq!(cache.store().get(FETCH_TIME_KEY), Some("5000".to_string()));
    }
}
