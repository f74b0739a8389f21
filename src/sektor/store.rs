//! CRUD helper over a single storage key holding a JSON array of records.
//!
//! DESIGN
//! ======
//! Storage owns the records; `sektor` is an in-memory copy re-serialized in
//! full after every mutation. Mutations touch memory first and storage
//! second. A failed write is not rolled back, so the two may disagree until
//! the next successful write or `load_sektor`.
//!
//! ERROR HANDLING
//! ==============
//! No operation returns an error. Failures are logged, stored in `error`,
//! and reported through the `None`/`false` return value. `error` is only
//! replaced by the next failure or cleared by `clear_error`.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};
use tracing::{debug, error};

use super::storage::{KeyValueStore, StorageError};
use super::types::{SektorError, SektorOp, SektorRecord};
use crate::config::{ApiConfig, DEFAULT_SEKTOR_STORAGE_KEY};
use crate::reactive::Observable;

pub struct SektorStore<S> {
    storage: S,
    key: String,
    sektor: Observable<Vec<SektorRecord>>,
    loading: Observable<bool>,
    error: Observable<Option<SektorError>>,
    initialized: AtomicBool,
}

impl<S: KeyValueStore> SektorStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_SEKTOR_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            sektor: Observable::default(),
            loading: Observable::default(),
            error: Observable::default(),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn from_config(storage: S, config: &ApiConfig) -> Self {
        Self::with_key(storage, config.storage_key.clone())
    }

    pub fn sektor(&self) -> &Observable<Vec<SektorRecord>> {
        &self.sektor
    }

    pub fn loading(&self) -> &Observable<bool> {
        &self.loading
    }

    pub fn error(&self) -> &Observable<Option<SektorError>> {
        &self.error
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Load from storage the first time it is called; later calls do nothing.
    /// The owning view calls this once when it is created.
    pub fn initialize(&self) {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            self.load_sektor();
        }
    }

    /// Replace the in-memory list with the stored one (empty when unset).
    /// On failure the in-memory list is left as it was.
    pub fn load_sektor(&self) {
        self.loading.set(true);
        let _loading = self.loading.reset_on_drop(|v| *v = false);

        match self.read_all() {
            Ok(records) => {
                debug!(key = %self.key, count = records.len(), "sektor loaded");
                self.sektor.set(records);
            }
            Err(e) => self.record_failure(SektorError::storage(SektorOp::Load, e)),
        }
    }

    /// Append a record with a fresh timestamp id and persist the list.
    pub fn add_sektor(&self, fields: Map<String, Value>) -> Option<SektorRecord> {
        self.loading.set(true);
        let _loading = self.loading.reset_on_drop(|v| *v = false);

        let mut created = None;
        self.sektor.update(|list| {
            let id = next_id(list, now_millis());
            let record = SektorRecord::new(id, fields);
            list.push(record.clone());
            created = Some(record);
        });

        match self.write_all() {
            Ok(()) => created,
            Err(e) => {
                self.record_failure(SektorError::storage(SektorOp::Add, e));
                None
            }
        }
    }

    /// Replace the record whose id matches `updated.id` and persist the list.
    pub fn update_sektor(&self, updated: SektorRecord) -> Option<SektorRecord> {
        self.loading.set(true);
        let _loading = self.loading.reset_on_drop(|v| *v = false);

        let updated = updated.normalized();
        let replaced = self.sektor.update_if(|list| match list.iter_mut().find(|s| s.id == updated.id) {
            Some(slot) => {
                *slot = updated.clone();
                true
            }
            None => false,
        });
        if !replaced {
            self.record_failure(SektorError::NotFound { id: updated.id });
            return None;
        }

        match self.write_all() {
            Ok(()) => Some(updated),
            Err(e) => {
                self.record_failure(SektorError::storage(SektorOp::Update, e));
                None
            }
        }
    }

    /// Remove every record with `id` and persist the list. Deleting an id that
    /// is not present still rewrites storage and returns `true`.
    pub fn delete_sektor(&self, id: &str) -> bool {
        self.loading.set(true);
        let _loading = self.loading.reset_on_drop(|v| *v = false);

        self.sektor.update(|list| list.retain(|s| s.id != id));

        match self.write_all() {
            Ok(()) => true,
            Err(e) => {
                self.record_failure(SektorError::storage(SektorOp::Delete, e));
                false
            }
        }
    }

    fn read_all(&self) -> Result<Vec<SektorRecord>, StorageError> {
        match self.storage.get(&self.key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::Serde(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn write_all(&self) -> Result<(), StorageError> {
        let raw = self
            .sektor
            .with(|list| serde_json::to_string(list))
            .map_err(|e| StorageError::Serde(e.to_string()))?;
        self.storage.set(&self.key, &raw)
    }

    fn record_failure(&self, err: SektorError) {
        error!(error = %err, key = %self.key, op = err.op().as_str(), "sektor operation failed");
        self.error.set(Some(err));
    }
}

// =============================================================================
// IDS
// =============================================================================

fn now_millis() -> u64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    u64::try_from(dur.as_millis()).unwrap_or(u64::MAX)
}

/// `now` as a decimal string, stepped forward past any id already in `list`.
fn next_id(list: &[SektorRecord], now: u64) -> String {
    let taken: HashSet<&str> = list.iter().map(|s| s.id.as_str()).collect();
    let mut candidate = now;
    loop {
        let id = candidate.to_string();
        if !taken.contains(id.as_str()) {
            return id;
        }
        candidate = candidate.saturating_add(1);
    }
}
