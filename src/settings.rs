//! Durable session settings
//!
//! The only state that outlives a scan is the user's exclusion list. It
//! lives in a redb key-value table, one JSON-encoded value per key. A
//! missing table or key reads as "nothing stored" so first runs fall back
//! to the caller's default. The in-memory variant backs tests.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::path::Path;

const SETTINGS_TABLE: redb::TableDefinition<&str, &[u8]> = redb::TableDefinition::new("settings");

/// Key under which the exclusion list is stored
pub const IGNORED_KEY: &str = "ignored-sections-or-frames";

pub struct SettingsStore {
    db: Option<redb::Database>,
    /// Backing map when no database is attached (tests)
    mem: FxHashMap<String, Vec<u8>>,
}

impl SettingsStore {
    /// Create or open a settings store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = redb::Database::create(path).context("Failed to open settings database")?;
        Ok(Self {
            db: Some(db),
            mem: FxHashMap::default(),
        })
    }

    /// Volatile store with the same API (no persistence)
    pub fn in_memory() -> Self {
        Self {
            db: None,
            mem: FxHashMap::default(),
        }
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let Some(db) = &self.db else {
            return Ok(self.mem.get(key).cloned());
        };
        let txn = db.begin_read().context("Failed to begin read transaction")?;
        let table = match txn.open_table(SETTINGS_TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e).context("Failed to open settings table"),
        };
        let value = table.get(key).context("Failed to read settings key")?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let Some(db) = &self.db else {
            self.mem.insert(key.to_string(), value.to_vec());
            return Ok(());
        };
        let txn = db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = txn
                .open_table(SETTINGS_TABLE)
                .context("Failed to open settings table")?;
            table
                .insert(key, value)
                .context("Failed to write settings key")?;
        }
        txn.commit().context("Failed to commit settings write")?;
        Ok(())
    }

    /// The stored exclusion list, `None` when nothing was ever persisted
    pub fn load_ignored(&self) -> Result<Option<Vec<String>>> {
        match self.get(IGNORED_KEY)? {
            Some(bytes) => {
                let names = serde_json::from_slice(&bytes)
                    .context("Stored exclusion list is not valid JSON")?;
                Ok(Some(names))
            }
            None => Ok(None),
        }
    }

    /// Persist the exclusion list. Returns only after the write committed.
    pub fn store_ignored(&mut self, names: &[String]) -> Result<()> {
        let bytes = serde_json::to_vec(names)?;
        self.put(IGNORED_KEY, &bytes)?;
        tracing::debug!(entries = names.len(), "persisted exclusion list");
        Ok(())
    }
}
