use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of "now" for cache freshness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: serde_json::Value,
    fetched_at: DateTime<Utc>,
}

/// In-memory response cache keyed by serialized request.
///
/// Entries are valid while `now - fetched_at < ttl`. There is no size bound;
/// the key space is limited by the distinct requests a session makes.
#[derive(Debug)]
pub struct ResponseCache<C = SystemClock> {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    clock: C,
}

impl ResponseCache<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> ResponseCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a fresh value from cache. Expired or undecodable entries are
    /// treated as misses.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        if !self.is_fresh(entry) {
            debug!(key, "Cache entry expired");
            return None;
        }

        match serde_json::from_value(entry.payload.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "Cached payload has unexpected shape: {e}");
                None
            }
        }
    }

    /// Store a value stamped with the current time, replacing any previous entry.
    pub fn insert<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), serde_json::Error> {
        let payload = serde_json::to_value(value)?;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                payload,
                fetched_at: self.clock.now(),
            },
        );
        Ok(())
    }

    /// Check if a fresh entry exists for key
    pub fn contains(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|entry| self.is_fresh(entry))
    }

    /// Delete a key from cache
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Delete every key starting with `prefix`
    pub fn invalidate_prefix(&mut self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop expired entries.
    pub fn purge_expired(&mut self) {
        let now = self.clock.now();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| Self::fresh_at(entry, now, ttl));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        Self::fresh_at(entry, self.clock.now(), self.ttl)
    }

    fn fresh_at(entry: &CacheEntry, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - entry.fetched_at).to_std() {
            Ok(age) => age < ttl,
            // Clock went backwards; the entry is younger than "now".
            Err(_) => true,
        }
    }
}

/// Server-side cache of derived listing responses, keyed by canonical query.
pub type ListingCache = moka::future::Cache<String, serde_json::Value>;

pub fn listing_cache(config: &CacheConfig) -> ListingCache {
    moka::future::Cache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_entries)
        .build()
}

/// Cache key generators
pub mod keys {
    use crate::models::workers::WorkerQuery;

    pub const WORKER_LIST_PREFIX: &str = "workers:list:";

    /// Generate key for a worker listing request. Built from the query-string
    /// pairs, so requests the server cannot tell apart share one key.
    pub fn worker_list(query: &WorkerQuery) -> String {
        let pairs = query.to_query_pairs();
        let serialized = serde_json::to_string(&pairs).unwrap_or_else(|_| format!("{pairs:?}"));
        format!("{WORKER_LIST_PREFIX}{serialized}")
    }

    /// Generate key for the service name list
    pub fn services() -> String {
        "services:list".to_string()
    }

    /// Generate key for per-service statistics
    pub fn service_stats() -> String {
        "services:stats".to_string()
    }
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300), // 5 minutes
            max_entries: 1000,
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl: parse_duration_secs("CACHE_TTL_SECS", defaults.ttl.as_secs()),
            max_entries: std::env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
        }
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn entry_expires_after_ttl() {
        let clock = ManualClock::default();
        let mut cache = ResponseCache::with_clock(TTL, clock.clone());
        cache.insert("k", &vec!["Mason"]).unwrap();

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get::<Vec<String>>("k"), Some(vec!["Mason".to_string()]));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get::<Vec<String>>("k"), None);
        assert!(!cache.contains("k"));
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = ResponseCache::with_clock(TTL, ManualClock::default());
        cache.insert("workers:list:a", &1).unwrap();
        cache.insert("workers:list:b", &2).unwrap();
        cache.insert("services:list", &3).unwrap();

        assert!(cache.invalidate("workers:list:a"));
        assert!(!cache.invalidate("workers:list:a"));

        cache.invalidate_prefix(keys::WORKER_LIST_PREFIX);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn purge_drops_only_expired() {
        let clock = ManualClock::default();
        let mut cache = ResponseCache::with_clock(TTL, clock.clone());
        cache.insert("old", &1).unwrap();
        clock.advance(Duration::from_secs(200));
        cache.insert("new", &2).unwrap();
        clock.advance(Duration::from_secs(150));

        cache.purge_expired();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<i32>("new"), Some(2));
    }

    #[test]
    fn equivalent_worker_queries_share_a_key() {
        use crate::listing::FilterSpec;
        use crate::models::workers::WorkerQuery;

        let bare = WorkerQuery::new(1, 12);
        let defaulted = WorkerQuery::new(1, 12).with_filters(FilterSpec::default());
        let blank_search = WorkerQuery::new(1, 12).with_filters(FilterSpec::default().with_search("  "));
        let all_services = WorkerQuery::new(1, 12).with_filters(FilterSpec::for_service("all"));

        let key = keys::worker_list(&bare);
        assert_eq!(keys::worker_list(&defaulted), key);
        assert_eq!(keys::worker_list(&blank_search), key);
        assert_eq!(keys::worker_list(&all_services), key);

        let narrowed = WorkerQuery::new(1, 12).with_filters(FilterSpec::for_service("Plumber"));
        assert_ne!(keys::worker_list(&narrowed), key);
        assert_ne!(keys::worker_list(&WorkerQuery::new(2, 12)), key);
    }

    #[test]
    fn mismatched_type_is_a_miss() {
        let mut cache = ResponseCache::with_clock(TTL, ManualClock::default());
        cache.insert("k", &"text").unwrap();
        assert_eq!(cache.get::<u64>("k"), None);
    }
}
