//! TTL-bounded cache for the category-type reference list.
//!
//! # Design
//! - One in-memory entry mirrored to a persisted key-value slot so a page
//!   reload can rehydrate without a network call.
//! - The cache never fetches; the service layer consults [`CategoryCache`]
//!   first and stores what it fetched, which keeps this module free of I/O
//!   and testable on any target.
//! - Persistence failures degrade the cache to in-memory-only; they never
//!   surface to the user because correctness does not depend on the mirror.

use notifly_api_models::CategoryType;

/// How long a stored entry stays fresh.
pub const CACHE_TTL_MS: i64 = 14 * 60 * 1000;

/// Persisted slot holding the JSON array of category types.
pub const CACHE_KEY: &str = "category_types_cache";

/// Persisted slot holding the epoch-millisecond stamp of the array.
pub const CACHE_TIMESTAMP_KEY: &str = "category_types_cache_timestamp";

/// String-keyed durable storage the cache mirrors into.
///
/// The wasm build backs this with browser localStorage; tests use an
/// in-memory map.
pub trait KeyValueStore {
    /// Read a value, `None` when the key is absent.
    fn read(&self, key: &str) -> Option<String>;
    /// Write a value; the error carries the storage engine's reason.
    ///
    /// # Errors
    ///
    /// Returns the storage engine's failure reason (for example, quota
    /// exceeded) when the value cannot be persisted.
    fn write(&mut self, key: &str, value: &str) -> Result<(), String>;
    /// Remove a key; absent keys are not an error.
    fn delete(&mut self, key: &str);
}

/// Outcome of a [`CategoryCache::store`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Entry is in memory and mirrored to durable storage.
    Persisted,
    /// Both mirror attempts failed; the entry lives in memory only for the
    /// rest of the session. The caller may log the reason.
    MemoryOnly,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<CategoryType>,
    timestamp_ms: i64,
}

impl CacheEntry {
    const fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp_ms < CACHE_TTL_MS
    }
}

/// TTL cache for the category-type list, mirrored into a [`KeyValueStore`].
#[derive(Debug)]
pub struct CategoryCache<S: KeyValueStore> {
    store: S,
    entry: Option<CacheEntry>,
}

impl<S: KeyValueStore> CategoryCache<S> {
    /// Wrap a storage backend with an empty in-memory entry.
    pub const fn new(store: S) -> Self {
        Self { store, entry: None }
    }

    /// Return the cached list when fresh, rehydrating from the persisted
    /// mirror if the in-memory entry is missing or stale.
    pub fn load(&mut self, now_ms: i64) -> Option<Vec<CategoryType>> {
        if let Some(entry) = &self.entry {
            if entry.is_fresh(now_ms) {
                return Some(entry.data.clone());
            }
        }
        let entry = self.rehydrate()?;
        if !entry.is_fresh(now_ms) {
            return None;
        }
        let data = entry.data.clone();
        self.entry = Some(entry);
        Some(data)
    }

    /// Stamp and store a freshly fetched list in memory and in the mirror.
    ///
    /// A failed mirror write triggers one clear-and-retry; a second failure
    /// degrades to memory-only.
    pub fn store(&mut self, items: Vec<CategoryType>, now_ms: i64) -> StoreOutcome {
        self.entry = Some(CacheEntry {
            data: items,
            timestamp_ms: now_ms,
        });
        self.persist(now_ms)
    }

    /// Drop the in-memory entry and the persisted mirror.
    pub fn invalidate(&mut self) {
        self.entry = None;
        self.store.delete(CACHE_KEY);
        self.store.delete(CACHE_TIMESTAMP_KEY);
    }

    /// Insert or replace an item, keeping the list sorted by name, and
    /// re-stamp the cache so the UI need not refetch after a mutation.
    pub fn upsert(&mut self, item: CategoryType, now_ms: i64) -> StoreOutcome {
        let mut data = self
            .entry
            .take()
            .map(|entry| entry.data)
            .unwrap_or_default();
        data.retain(|existing| existing.id != item.id);
        data.push(item);
        data.sort_by_key(|entry| entry.name.to_lowercase());
        self.store(data, now_ms)
    }

    /// Remove an item by id and re-stamp the cache.
    pub fn remove(&mut self, id: uuid::Uuid, now_ms: i64) -> StoreOutcome {
        let mut data = self
            .entry
            .take()
            .map(|entry| entry.data)
            .unwrap_or_default();
        data.retain(|existing| existing.id != id);
        self.store(data, now_ms)
    }

    fn rehydrate(&self) -> Option<CacheEntry> {
        let raw = self.store.read(CACHE_KEY)?;
        let stamp = self.store.read(CACHE_TIMESTAMP_KEY)?;
        let data: Vec<CategoryType> = serde_json::from_str(&raw).ok()?;
        let timestamp_ms: i64 = stamp.parse().ok()?;
        Some(CacheEntry { data, timestamp_ms })
    }

    fn persist(&mut self, now_ms: i64) -> StoreOutcome {
        if self.try_persist(now_ms).is_ok() {
            return StoreOutcome::Persisted;
        }
        // One clear-and-retry: a full slot may just need the stale copy gone.
        self.store.delete(CACHE_KEY);
        self.store.delete(CACHE_TIMESTAMP_KEY);
        if self.try_persist(now_ms).is_ok() {
            StoreOutcome::Persisted
        } else {
            StoreOutcome::MemoryOnly
        }
    }

    fn try_persist(&mut self, now_ms: i64) -> Result<(), String> {
        let Some(entry) = &self.entry else {
            return Ok(());
        };
        let json = serde_json::to_string(&entry.data).map_err(|err| err.to_string())?;
        self.store.write(CACHE_KEY, &json)?;
        self.store.write(CACHE_TIMESTAMP_KEY, &now_ms.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[derive(Default)]
    struct MemoryStore {
        slots: HashMap<String, String>,
        failures_left: u32,
    }

    impl KeyValueStore for MemoryStore {
        fn read(&self, key: &str) -> Option<String> {
            self.slots.get(key).cloned()
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err("quota exceeded".to_string());
            }
            self.slots.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn delete(&mut self, key: &str) {
            self.slots.remove(key);
        }
    }

    impl KeyValueStore for &mut MemoryStore {
        fn read(&self, key: &str) -> Option<String> {
            <MemoryStore as KeyValueStore>::read(self, key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
            <MemoryStore as KeyValueStore>::write(self, key, value)
        }

        fn delete(&mut self, key: &str) {
            <MemoryStore as KeyValueStore>::delete(self, key);
        }
    }

    fn category(name: &str) -> CategoryType {
        CategoryType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn load_within_ttl_hits_memory() {
        let mut cache = CategoryCache::new(MemoryStore::default());
        cache.store(vec![category("Alerts")], 0);
        let loaded = cache.load(CACHE_TTL_MS - 1).expect("fresh");
        assert_eq!(loaded.len(), 1);
        assert!(cache.load(CACHE_TTL_MS).is_none());
    }

    #[test]
    fn reload_rehydrates_from_the_mirror() {
        let mut store = MemoryStore::default();
        {
            let mut cache = CategoryCache::new(&mut store);
            cache.store(vec![category("Alerts")], 1_000);
        }
        // Fresh cache instance simulating a page reload over the same slots.
        let mut cache = CategoryCache::new(&mut store);
        let loaded = cache.load(2_000).expect("rehydrated");
        assert_eq!(loaded[0].name, "Alerts");
    }

    #[test]
    fn two_gets_within_ttl_cost_one_fetch() {
        // Mirrors the service layer: consult the cache, fetch only on a miss.
        let mut cache = CategoryCache::new(MemoryStore::default());
        let mut fetches = 0_u32;
        for now_ms in [0, CACHE_TTL_MS - 1, CACHE_TTL_MS] {
            if cache.load(now_ms).is_none() {
                fetches += 1;
                cache.store(vec![category("Alerts")], now_ms);
            }
        }
        // The first two calls share one fetch; the third falls past the TTL.
        assert_eq!(fetches, 2);
    }

    #[test]
    fn invalidate_clears_memory_and_mirror() {
        let mut cache = CategoryCache::new(MemoryStore::default());
        cache.store(vec![category("Alerts")], 0);
        cache.invalidate();
        assert!(cache.load(1).is_none());
        assert!(cache.store.slots.is_empty());
    }

    #[test]
    fn upsert_keeps_the_list_sorted_and_replaces_by_id() {
        let mut cache = CategoryCache::new(MemoryStore::default());
        let mut promo = category("Promotions");
        cache.store(vec![category("alerts"), promo.clone()], 0);

        promo.name = "Deals".to_string();
        cache.upsert(promo.clone(), 1);
        cache.upsert(category("Billing"), 2);

        let names: Vec<String> = cache
            .load(3)
            .expect("fresh")
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["alerts", "Billing", "Deals"]);
    }

    #[test]
    fn remove_drops_the_item_and_restamps() {
        let mut cache = CategoryCache::new(MemoryStore::default());
        let alerts = category("Alerts");
        cache.store(vec![alerts.clone(), category("Billing")], 0);
        cache.remove(alerts.id, CACHE_TTL_MS + 5);
        let loaded = cache.load(CACHE_TTL_MS + 6).expect("restamped");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Billing");
    }

    #[test]
    fn write_failure_retries_once_after_clearing() {
        let mut cache = CategoryCache::new(MemoryStore {
            failures_left: 1,
            ..MemoryStore::default()
        });
        let outcome = cache.store(vec![category("Alerts")], 0);
        assert_eq!(outcome, StoreOutcome::Persisted);
        assert!(cache.store.slots.contains_key(CACHE_KEY));
    }

    #[test]
    fn persistent_write_failure_degrades_to_memory_only() {
        let mut cache = CategoryCache::new(MemoryStore {
            failures_left: u32::MAX,
            ..MemoryStore::default()
        });
        let outcome = cache.store(vec![category("Alerts")], 0);
        assert_eq!(outcome, StoreOutcome::MemoryOnly);
        // The entry still serves from memory for the session.
        assert!(cache.load(1).is_some());
    }
}
