//! Settings store implementations
//!
//! Settings are stored as key-value pairs with JSON values, so the same map
//! can live in memory or be written to a small JSON document on disk.
//!
//! # Example
//!
//! ```rust,no_run
//! use soul_core::{JsonFileSettingsStore, SettingsStore};
//! # fn example() -> soul_core::Result<()> {
//! let store = JsonFileSettingsStore::open("/data/equalizer_prefs.json")?;
//! store.set_string("equalizer_preset", "ROCK")?;
//! assert_eq!(store.get_string("equalizer_preset").as_deref(), Some("ROCK"));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::traits::SettingsStore;

type SettingsMap = BTreeMap<String, Value>;

fn lock(map: &Mutex<SettingsMap>) -> MutexGuard<'_, SettingsMap> {
    // A panic while holding the lock cannot leave the map half-written
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process settings store
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<SettingsMap>,
}

impl MemorySettingsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        lock(&self.values).len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        lock(&self.values).is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        lock(&self.values)
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        lock(&self.values).insert(key.to_string(), Value::Bool(value));
        Ok(())
    }

    fn get_string(&self, key: &str) -> Option<String> {
        lock(&self.values)
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.values).insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        lock(&self.values).clear();
        Ok(())
    }
}

/// Settings store persisted as a JSON object file
///
/// The whole map is rewritten on every change (settings are tiny). Writes go
/// to a sibling temp file first and are then renamed over the target.
#[derive(Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    values: Mutex<SettingsMap>,
}

impl JsonFileSettingsStore {
    /// Open a store, loading existing values if the file exists
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not a JSON object
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                SettingsMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            SettingsMap::new()
        };

        debug!("Opened settings store {:?} ({} keys)", path, values.len());

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a change, committing it in memory only once it is on disk
    fn update(&self, apply: impl FnOnce(&mut SettingsMap)) -> Result<()> {
        let mut values = lock(&self.values);
        let mut next = values.clone();
        apply(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn persist(&self, values: &SettingsMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        lock(&self.values)
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), Value::Bool(value));
        })
    }

    fn get_string(&self, key: &str) -> Option<String> {
        lock(&self.values)
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn clear(&self) -> Result<()> {
        self.update(BTreeMap::clear)
    }
}
