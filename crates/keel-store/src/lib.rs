//! Ordered, thread-safe in-memory repositories.
//!
//! A repository maps keys to entities. The key of each entity is derived by a
//! [`KeyExtractor`] bound to the repository at construction, and the key is
//! both the entity's identity and its position: every multi-entity read comes
//! back in ascending key order.
//!
//! # Components
//!
//! - [`KeyExtractor`] -- derives the ordering key from an entity
//! - [`Repository`] -- the CRUD + paging contract
//! - [`InMemoryRepository`] -- `BTreeMap`-backed implementation behind a `RwLock`
//! - [`paging`] -- [`PageRequest`], [`Sort`], [`Page`] and the slicer
//!
//! # Design Rules
//!
//! 1. Keys are unique. A save with an existing key overwrites the entity.
//! 2. Reads copy a snapshot under the lock and process it after release.
//! 3. Pages are cut from one snapshot, so content and total always agree.
//! 4. Ordering is always by key; sort specifications are rejected.
//! 5. Batch operations are applied one entity at a time, without rollback.
//!
//! ```
//! use keel_store::{InMemoryRepository, PageRequest, Repository};
//!
//! #[derive(Clone)]
//! struct Job { id: u64 }
//!
//! let jobs: InMemoryRepository<Job, u64, _> = InMemoryRepository::new(|j: &Job| j.id);
//! for id in [5, 1, 4, 2, 3] {
//!     jobs.save(Job { id }).unwrap();
//! }
//! let page = jobs.find_all_paged(&PageRequest::new(1, 2)).unwrap();
//! let ids: Vec<u64> = page.content().iter().map(|j| j.id).collect();
//! assert_eq!(ids, vec![2, 3]);
//! assert_eq!(page.total(), 5);
//! ```

pub mod config;
pub mod error;
pub mod key;
pub mod memory;
pub mod paging;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use key::KeyExtractor;
pub use memory::InMemoryRepository;
pub use paging::{Direction, Order, Page, PageRequest, Sort};
pub use traits::Repository;
