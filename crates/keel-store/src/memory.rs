use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::key::KeyExtractor;
use crate::paging::{self, Page, PageRequest, Sort};
use crate::traits::Repository;

/// In-memory, `BTreeMap`-based repository.
///
/// Entries live behind a single `RwLock`. Writers take the write guard for
/// the duration of the mutation; readers copy what they need under the read
/// guard and release it before any further processing, so a snapshot never
/// observes a half-applied write. Entities are cloned on read and write.
pub struct InMemoryRepository<T, K, E> {
    entries: RwLock<BTreeMap<K, T>>,
    extractor: E,
    config: StoreConfig,
}

impl<T, K, E> InMemoryRepository<T, K, E>
where
    K: Ord,
    E: KeyExtractor<T, K>,
{
    /// Create an empty repository keyed by `extractor`.
    pub fn new(extractor: E) -> Self {
        Self::with_config(StoreConfig::default(), extractor)
    }

    pub fn with_config(config: StoreConfig, extractor: E) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            extractor,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The key this repository derives for `entity`.
    pub fn key_for(&self, entity: &T) -> K {
        self.extractor.key_for(entity)
    }

    /// Ascending snapshot of all keys.
    pub fn keys(&self) -> StoreResult<Vec<K>>
    where
        K: Clone,
    {
        Ok(self.read_entries()?.keys().cloned().collect())
    }

    fn read_entries(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<K, T>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write_entries(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<K, T>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl<T, K, E> InMemoryRepository<T, K, E>
where
    T: Clone,
    K: Ord,
    E: KeyExtractor<T, K>,
{
    /// Ordered copy of every entity, taken under the read guard.
    fn snapshot(&self) -> StoreResult<Vec<T>> {
        let entries = self.read_entries()?;
        Ok(entries.values().cloned().collect())
    }

    /// The entity stored under `key`, inserting `make()` first if absent.
    ///
    /// Lookup and insert run under one write guard, so a concurrent save of
    /// the same key is never overwritten. `make` must produce an entity whose
    /// derived key equals `key`.
    pub fn find_or_insert_with<F>(&self, key: K, make: F) -> StoreResult<T>
    where
        F: FnOnce() -> T,
    {
        let mut entries = self.write_entries()?;
        if let Some(existing) = entries.get(&key) {
            return Ok(existing.clone());
        }
        let entity = make();
        debug_assert!(self.extractor.key_for(&entity) == key);
        entries.insert(key, entity.clone());
        debug!(repository = %self.config.name, count = entries.len(), "entity inserted");
        Ok(entity)
    }
}

impl<T, K, E> Repository<T, K> for InMemoryRepository<T, K, E>
where
    T: Clone + Send + Sync,
    K: Ord + Send + Sync,
    E: KeyExtractor<T, K>,
{
    fn save(&self, entity: T) -> StoreResult<T> {
        let key = self.extractor.key_for(&entity);
        let mut entries = self.write_entries()?;
        let replaced = entries.insert(key, entity.clone()).is_some();
        debug!(
            repository = %self.config.name,
            replaced,
            count = entries.len(),
            "entity saved"
        );
        Ok(entity)
    }

    fn find_one(&self, key: &K) -> StoreResult<Option<T>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn exists(&self, key: &K) -> StoreResult<bool> {
        Ok(self.read_entries()?.contains_key(key))
    }

    fn find_all(&self) -> StoreResult<Vec<T>> {
        self.snapshot()
    }

    fn find_all_by_keys(&self, keys: &[K]) -> StoreResult<Vec<T>> {
        let entries = self.read_entries()?;
        Ok(keys.iter().filter_map(|k| entries.get(k).cloned()).collect())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.read_entries()?.len())
    }

    fn delete(&self, key: &K) -> StoreResult<bool> {
        let mut entries = self.write_entries()?;
        let removed = entries.remove(key).is_some();
        if removed {
            debug!(repository = %self.config.name, count = entries.len(), "entity deleted");
        }
        Ok(removed)
    }

    fn delete_entity(&self, entity: &T) -> StoreResult<bool> {
        let key = self.extractor.key_for(entity);
        self.delete(&key)
    }

    fn delete_all(&self) -> StoreResult<()> {
        let mut entries = self.write_entries()?;
        let cleared = entries.len();
        entries.clear();
        debug!(repository = %self.config.name, cleared, "repository cleared");
        Ok(())
    }

    fn find_all_paged(&self, request: &PageRequest) -> StoreResult<Page<T>> {
        // The guard is dropped inside `snapshot`; slicing runs unlocked.
        let items = self.snapshot()?;
        paging::slice(items, request, self.config.max_page_size).inspect_err(|e| {
            warn!(repository = %self.config.name, error = %e, "page request rejected");
        })
    }

    fn find_all_sorted(&self, sort: &Sort) -> StoreResult<Vec<T>> {
        warn!(repository = %self.config.name, %sort, "sorted retrieval requested");
        Err(StoreError::UnsupportedOperation(
            "arbitrary sorting is not implemented",
        ))
    }
}

impl<T, K, E> std::fmt::Debug for InMemoryRepository<T, K, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.read().map(|m| m.len()).ok();
        f.debug_struct("InMemoryRepository")
            .field("name", &self.config.name)
            .field("entry_count", &count)
            .finish()
    }
}
