//! Durable display state backed by a single JSON document.
//!
//! The whole document is rewritten atomically on every change, so a flag set
//! before a crash or relaunch is visible to the next process that opens the
//! same path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::atomic_io::{io_error, write_text_atomic};
use crate::{DisplayStateStore, StoreError, StoreResult, StoredValue};

pub const DISPLAY_STATE_SCHEMA_VERSION: u32 = 1;

/// On-disk layout of the display state file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub entries: BTreeMap<String, StoredValue>,
}

pub fn default_display_state_path() -> StoreResult<PathBuf> {
    let cwd = std::env::current_dir().map_err(|source| io_error(Path::new("."), source))?;
    Ok(cwd.join(".tutti").join("display-state.json"))
}

pub fn decode_store_document(raw: &str) -> StoreResult<BTreeMap<String, StoredValue>> {
    let parsed = serde_json::from_str::<StoreDocument>(raw)?;
    if parsed.schema_version != DISPLAY_STATE_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found: parsed.schema_version,
            expected: DISPLAY_STATE_SCHEMA_VERSION,
        });
    }
    Ok(parsed.entries)
}

pub fn encode_store_document(entries: &BTreeMap<String, StoredValue>) -> StoreResult<String> {
    let payload = StoreDocument {
        schema_version: DISPLAY_STATE_SCHEMA_VERSION,
        entries: entries.clone(),
    };
    let mut encoded = serde_json::to_string_pretty(&payload)?;
    encoded.push('\n');
    Ok(encoded)
}

/// Write-through store persisting every change to `path`.
#[derive(Debug)]
pub struct JsonFileDisplayStateStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, StoredValue>>,
    last_persist_error: Mutex<Option<String>>,
}

impl JsonFileDisplayStateStore {
    /// Opens the store at `path`. A missing file is an empty store; a file that
    /// cannot be read or decoded is an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw =
                std::fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            decode_store_document(&raw)?
        } else {
            BTreeMap::new()
        };
        tracing::debug!(entries = entries.len(), "opened display state store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
            last_persist_error: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> BTreeMap<String, StoredValue> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Message of the most recent failed write, cleared by the next successful
    /// one.
    pub fn last_persist_error(&self) -> Option<String> {
        self.last_persist_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Writes the current entries to disk.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn persist(&self) -> StoreResult<()> {
        let entries = self.snapshot();
        let result = self.write_document(&entries);
        self.record_persist_result(&result);
        result
    }

    fn write_document(&self, entries: &BTreeMap<String, StoredValue>) -> StoreResult<()> {
        let encoded = encode_store_document(entries)?;
        write_text_atomic(&self.path, &encoded)
    }

    fn record_persist_result(&self, result: &StoreResult<()>) {
        let mut slot = self
            .last_persist_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match result {
            Ok(()) => *slot = None,
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "failed to persist display state"
                );
                *slot = Some(error.to_string());
            }
        }
    }

    fn has_persist_error(&self) -> bool {
        self.last_persist_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn write_through(&self, entries: &BTreeMap<String, StoredValue>) {
        let result = self.write_document(entries);
        self.record_persist_result(&result);
    }
}

impl DisplayStateStore for JsonFileDisplayStateStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    fn set(&self, key: &str, value: StoredValue) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.get(key) == Some(&value) && !self.has_persist_error() {
            return;
        }
        tracing::debug!(key, ?value, "display state write");
        entries.insert(key.to_string(), value);
        self.write_through(&entries);
    }

    fn remove(&self, key: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_none() {
            return false;
        }
        self.write_through(&entries);
        true
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}
