//! Display-state persistence for Tutti onboarding primitives.
//!
//! Provides the boolean/integer key-value store contract, an in-memory backend
//! for tests, a durable JSON file backend, and the single key namer every
//! displayable uses to map its identity to a storage key.

pub mod atomic_io;
pub mod json_file;
pub mod key_namer;

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use atomic_io::write_text_atomic;
pub use json_file::{
    decode_store_document, default_display_state_path, encode_store_document,
    JsonFileDisplayStateStore, StoreDocument, DISPLAY_STATE_SCHEMA_VERSION,
};
pub use key_namer::{display_state_key, validate_type_tag, KEY_PREFIX};

/// Result type for fallible store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced when opening or explicitly persisting a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access display state file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode display state document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported display state schema_version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },
    #[error("invalid displayable type tag '{0}'")]
    InvalidTypeTag(String),
    #[error("display state destination {0} is not a writable file path")]
    InvalidDestination(String),
}

/// One persisted value. Booleans and integers share a namespace, matching a
/// platform preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Int(i64),
}

impl StoredValue {
    /// Bool view of the value; integers read as `value != 0`.
    pub fn as_bool(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Int(value) => value != 0,
        }
    }

    /// Integer view of the value; booleans read as `1` or `0`.
    pub fn as_int(self) -> i64 {
        match self {
            Self::Bool(value) => i64::from(value),
            Self::Int(value) => value,
        }
    }
}

/// Key-value contract backing every displayable.
///
/// Reads never fail: unset keys yield `false`/`0`. Writes are last-write-wins
/// and are assumed to succeed; durable backends report persistence problems
/// through their own channels instead of through this trait.
pub trait DisplayStateStore: Send + Sync {
    fn get(&self, key: &str) -> Option<StoredValue>;
    fn set(&self, key: &str, value: StoredValue);
    fn remove(&self, key: &str) -> bool;
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;

    fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(StoredValue::as_bool).unwrap_or(false)
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.set(key, StoredValue::Bool(value));
    }

    fn get_int(&self, key: &str) -> i64 {
        self.get(key).map(StoredValue::as_int).unwrap_or(0)
    }

    fn set_int(&self, key: &str, value: i64) {
        self.set(key, StoredValue::Int(value));
    }
}

/// In-memory implementation for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryDisplayStateStore {
    entries: RwLock<BTreeMap<String, StoredValue>>,
}

impl InMemoryDisplayStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: BTreeMap<String, StoredValue>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of every stored entry, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<String, StoredValue> {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, StoredValue>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, StoredValue>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DisplayStateStore for InMemoryDisplayStateStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.read().get(key).copied()
    }

    fn set(&self, key: &str, value: StoredValue) {
        tracing::debug!(key, ?value, "display state write");
        self.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.read()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}
