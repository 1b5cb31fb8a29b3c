//! Key-value persistence capability for saved presentations.
//!
//! The editor saves the whole snapshot after every mutation under a single
//! well-known key, overwriting whatever was there. Hosts provide the
//! backing (the CLI uses one file per key); tests use [`MemoryStorage`].

use std::collections::HashMap;

use anyhow::Result;

/// The one key the editor saves under.
pub const STORAGE_KEY: &str = "glossdeck.presentation";

pub trait SnapshotStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());

        storage.set(STORAGE_KEY, "{\"meta\":{}}").unwrap();
        assert_eq!(storage.get(STORAGE_KEY).unwrap().as_deref(), Some("{\"meta\":{}}"));

        storage.set(STORAGE_KEY, "{}").unwrap();
        assert_eq!(storage.get(STORAGE_KEY).unwrap().as_deref(), Some("{}"));

        storage.remove(STORAGE_KEY).unwrap();
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
    }
}
