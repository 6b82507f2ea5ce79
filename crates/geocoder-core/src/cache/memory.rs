// crates/geocoder-core/src/cache/memory.rs
use super::CacheStore;
use crate::error::CacheError;
use crate::model::AddressCollection;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::warn;

#[derive(Debug, Clone)]
struct Entry {
    value: AddressCollection,
    /// `None` = never expires.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Process-local cache store with per-entry expiry.
///
/// Expired entries are dropped lazily on the next write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    ///
    /// A poisoned lock is logged and read through; the map itself is intact.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        let map = self.entries.read().unwrap_or_else(|err| {
            warn!("memory store lock poisoned, counting entries anyway");
            err.into_inner()
        });
        map.values().filter(|e| e.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry, recovering a poisoned lock.
    pub fn clear(&self) {
        let mut map = self.entries.write().unwrap_or_else(|err| {
            warn!("memory store lock poisoned, clearing anyway");
            err.into_inner()
        });
        map.clear();
        drop(map);
        self.entries.clear_poison();
    }
}

fn poisoned<E>(_: E) -> CacheError {
    CacheError::Unavailable("memory store lock poisoned".into())
}

impl CacheStore for MemoryStore {
    fn has(&self, key: &str) -> Result<bool, CacheError> {
        let map = self.entries.read().map_err(poisoned)?;
        Ok(map.get(key).is_some_and(|e| e.is_live(Instant::now())))
    }

    fn get(&self, key: &str) -> Result<Option<AddressCollection>, CacheError> {
        let map = self.entries.read().map_err(poisoned)?;
        let now = Instant::now();
        Ok(map
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    fn put(
        &self,
        key: &str,
        value: &AddressCollection,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let now = Instant::now();
        let mut map = self.entries.write().map_err(poisoned)?;
        map.retain(|_, e| e.is_live(now));
        map.insert(
            key.to_owned(),
            Entry {
                value: value.clone(),
                expires_at: ttl.and_then(|ttl| now.checked_add(ttl)),
            },
        );
        Ok(())
    }

    fn forget(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}
