/// Derives the ordering key of an entity.
///
/// A repository is bound to exactly one extractor at construction. The
/// extractor must be deterministic: re-deriving the key of an unchanged entity
/// yields an equal key, otherwise saves and deletes by entity address
/// different entries.
///
/// Any `Fn(&T) -> K` closure or function pointer is an extractor:
///
/// ```
/// use keel_store::KeyExtractor;
///
/// struct Module { name: String }
///
/// let by_name = |m: &Module| m.name.clone();
/// let m = Module { name: "http".into() };
/// assert_eq!(by_name.key_for(&m), "http");
/// ```
pub trait KeyExtractor<T, K>: Send + Sync {
    /// Derive the key for `entity`.
    fn key_for(&self, entity: &T) -> K;
}

impl<T, K, F> KeyExtractor<T, K> for F
where
    F: Fn(&T) -> K + Send + Sync,
{
    fn key_for(&self, entity: &T) -> K {
        self(entity)
    }
}
