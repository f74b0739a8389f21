//! Local CRUD helper for sektor records.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` abstracts browser-style key-value storage, `types` defines the
//! record and error shapes, and `store` implements the CRUD operations.

pub mod storage;
pub mod store;
pub mod types;

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::SektorStore;
pub use types::{SektorError, SektorOp, SektorRecord};
