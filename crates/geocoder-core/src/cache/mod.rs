// crates/geocoder-core/src/cache/mod.rs

//! # Query Cache
//!
//! Caching policy around provider lookups: key derivation, TTL, and the rule
//! that empty result sets are never stored. The store itself is pluggable via
//! [`CacheStore`]; [`MemoryStore`] is the in-process reference store.
//!
//! The cache is best-effort. Store failures are logged and treated as a miss
//! (on read) or skipped (on write); they never fail a lookup.

use crate::error::{CacheError, Result};
use crate::model::AddressCollection;
use crate::query::Query;
use crate::text::{slugify, url_encode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

mod memory;

pub use memory::MemoryStore;

/// Namespace prepended to every cache key.
pub const CACHE_KEY_PREFIX: &str = "geocoder-";

/// Key/value store holding result sets.
///
/// Implementations must be safe to share between threads; `get`/`put` are
/// expected to be atomic per entry.
pub trait CacheStore: Send + Sync {
    fn has(&self, key: &str) -> std::result::Result<bool, CacheError>;

    /// `Ok(None)` for absent or expired entries.
    fn get(&self, key: &str) -> std::result::Result<Option<AddressCollection>, CacheError>;

    /// `ttl` of `None` keeps the entry until it is forgotten.
    fn put(
        &self,
        key: &str,
        value: &AddressCollection,
        ttl: Option<Duration>,
    ) -> std::result::Result<(), CacheError>;

    fn forget(&self, key: &str) -> std::result::Result<(), CacheError>;
}

/// Derives the cache key for a piece of query text.
///
/// The text is URL-encoded, lower-cased and slugged, then prefixed with
/// [`CACHE_KEY_PREFIX`]. Non-ASCII input is turned into its UTF-8 percent
/// escapes before any case folding, so the key does not depend on locale.
///
/// ```rust
/// use geocoder_core::cache::cache_key;
///
/// assert_eq!(
///     cache_key("108-0075 東京都港区港南２丁目１６－３"),
///     "geocoder-108-0075e69db1e4baace983bde6b8afe58cbae6b8afe58d97efbc92e4b881e79baeefbc91efbc96efbc8defbc93"
/// );
/// ```
pub fn cache_key(text: &str) -> String {
    let encoded = url_encode(text).to_ascii_lowercase();
    format!("{CACHE_KEY_PREFIX}{}", slugify(&encoded))
}

/// Separates the slugged subject from hint and scope parts. Slugs only hold
/// `[a-z0-9-]`, so query text can never produce it.
pub const KEY_PART_DELIMITER: char = ':';

/// Cache key of a staged query.
///
/// The subject ([`Query::subject`]) is keyed like [`cache_key`]; every hint
/// that is set follows as `:name=value` with a URL-encoded value.
pub fn query_cache_key(query: &Query) -> String {
    scoped_cache_key(query, None)
}

/// Cache key of a query sent to a specific provider.
///
/// `None` is the unscoped key shared by lookups against the default
/// provider; any other provider gets its own `:provider=name` part.
///
/// ```rust
/// use geocoder_core::cache::scoped_cache_key;
/// use geocoder_core::{GeocodeQuery, Query};
///
/// let q = Query::from(GeocodeQuery::new("Wien").with_locale("de-DE"));
/// assert_eq!(scoped_cache_key(&q, None), "geocoder-wien:locale=de-DE");
/// assert_eq!(
///     scoped_cache_key(&q, Some("bing_maps")),
///     "geocoder-wien:locale=de-DE:provider=bing_maps"
/// );
/// ```
pub fn scoped_cache_key(query: &Query, provider: Option<&str>) -> String {
    let mut key = cache_key(&query.subject());
    for (name, value) in query.hints() {
        push_key_part(&mut key, name, &value);
    }
    if let Some(provider) = provider {
        push_key_part(&mut key, "provider", provider);
    }
    key
}

fn push_key_part(key: &mut String, name: &str, value: &str) {
    key.push(KEY_PART_DELIMITER);
    key.push_str(name);
    key.push('=');
    key.push_str(&url_encode(value));
}

/// Lifetime of cache entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheTtl {
    For(Duration),
    Forever,
}

impl CacheTtl {
    /// Durations too large to add to the current instant count as forever.
    pub fn from_secs(secs: u64) -> Self {
        let ttl = Duration::from_secs(secs);
        match std::time::Instant::now().checked_add(ttl) {
            Some(_) => CacheTtl::For(ttl),
            None => CacheTtl::Forever,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            CacheTtl::For(d) => Some(*d),
            CacheTtl::Forever => None,
        }
    }
}

/// Caching decorator applied to every lookup the aggregator performs.
#[derive(Clone)]
pub struct QueryCache {
    store: Arc<dyn CacheStore>,
    ttl: CacheTtl,
}

impl QueryCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: CacheTtl) -> Self {
        Self { store, ttl }
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn ttl(&self) -> CacheTtl {
        self.ttl
    }

    /// Returns the cached result for `query`, or runs `resolve` and caches a
    /// non-empty answer.
    ///
    /// Errors from `resolve` are returned as-is and nothing is written.
    pub fn remember<F>(&self, query: &Query, resolve: F) -> Result<AddressCollection>
    where
        F: FnOnce(&Query) -> Result<AddressCollection>,
    {
        self.remember_scoped(query, None, resolve)
    }

    /// [`remember`](Self::remember) under the key of [`scoped_cache_key`].
    pub fn remember_scoped<F>(
        &self,
        query: &Query,
        provider: Option<&str>,
        resolve: F,
    ) -> Result<AddressCollection>
    where
        F: FnOnce(&Query) -> Result<AddressCollection>,
    {
        let key = scoped_cache_key(query, provider);

        match self.store.get(&key) {
            Ok(Some(hit)) => {
                debug!(key = %key, hits = hit.len(), "geocoder cache hit");
                return Ok(hit);
            }
            Ok(None) => debug!(key = %key, "geocoder cache miss"),
            Err(err) => warn!(key = %key, error = %err, "geocoder cache read failed, treating as miss"),
        }

        let results = resolve(query)?;

        if results.is_empty() {
            debug!(key = %key, "empty result set, not caching");
            return Ok(results);
        }

        if let Err(err) = self.store.put(&key, &results, self.ttl.as_duration()) {
            warn!(key = %key, error = %err, "geocoder cache write failed");
        }
        Ok(results)
    }
}
