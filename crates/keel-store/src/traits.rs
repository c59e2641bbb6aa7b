use crate::error::{StoreError, StoreResult};
use crate::paging::{Page, PageRequest, Sort};

/// CRUD and key-ordered paging over entities of type `T` identified by `K`.
///
/// All implementations must satisfy these invariants:
/// - Keys are unique; saving an entity whose key is already present replaces
///   the stored entity.
/// - Every multi-entity read returns entities in ascending key order, taken
///   from a single consistent snapshot.
/// - Reads never hand out the live mapping, only copies.
/// - Ordering is always by key. Arbitrary sorting is never implemented.
/// - Batch operations are not atomic: a failure partway through leaves the
///   already-processed entities applied.
pub trait Repository<T, K>: Send + Sync {
    /// Insert or overwrite `entity` under its derived key and return it.
    fn save(&self, entity: T) -> StoreResult<T>;

    /// Save an optional entity, failing with `NullArgument` when absent.
    fn save_opt(&self, entity: Option<T>) -> StoreResult<T> {
        match entity {
            Some(entity) => self.save(entity),
            None => Err(StoreError::NullArgument("entity")),
        }
    }

    /// Save every entity in input order and return them.
    ///
    /// Stops at the first failure; earlier saves stay applied.
    fn save_all(&self, entities: Vec<T>) -> StoreResult<Vec<T>> {
        entities.into_iter().map(|e| self.save(e)).collect()
    }

    /// The entity stored under `key`, or `None`.
    fn find_one(&self, key: &K) -> StoreResult<Option<T>>;

    /// Whether an entity is stored under `key`.
    fn exists(&self, key: &K) -> StoreResult<bool>;

    /// Snapshot of all entities, ascending by key.
    fn find_all(&self) -> StoreResult<Vec<T>>;

    /// Entities for the given keys, in the order the keys are given.
    ///
    /// Keys with no stored entity are skipped.
    fn find_all_by_keys(&self, keys: &[K]) -> StoreResult<Vec<T>> {
        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(entity) = self.find_one(key)? {
                found.push(entity);
            }
        }
        Ok(found)
    }

    /// Number of stored entities.
    fn count(&self) -> StoreResult<usize>;

    /// Remove the entity stored under `key`. Returns `true` if it existed.
    fn delete(&self, key: &K) -> StoreResult<bool>;

    /// Remove the entity whose derived key matches `entity`'s.
    fn delete_entity(&self, entity: &T) -> StoreResult<bool>;

    /// Remove each entity. Absent ones are skipped.
    fn delete_entities(&self, entities: &[T]) -> StoreResult<()> {
        for entity in entities {
            self.delete_entity(entity)?;
        }
        Ok(())
    }

    /// Remove every entity.
    fn delete_all(&self) -> StoreResult<()>;

    /// The page of entities described by `request`, in key order.
    ///
    /// Fails with `UnsupportedSort` if the request carries a non-empty sort.
    fn find_all_paged(&self, request: &PageRequest) -> StoreResult<Page<T>>;

    /// Sorted retrieval. Never supported; always fails with
    /// `UnsupportedOperation`.
    fn find_all_sorted(&self, sort: &Sort) -> StoreResult<Vec<T>>;
}
