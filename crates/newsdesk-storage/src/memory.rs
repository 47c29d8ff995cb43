//! In-memory store
//!
//! Same contract as [`Database`](crate::Database) without touching disk.
//! Used by tests and by callers that opt out of persistence.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::store::KeyValueStore;
use crate::Result;

#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn put_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self.entries.write();
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn delete_all(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.entries.write();
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.put_all(&[("user", "{}"), ("token", "t1")]).unwrap();
        assert_eq!(other.get("token").unwrap().as_deref(), Some("t1"));
        assert_eq!(other.len(), 2);

        other.delete_all(&["user", "token", "missing"]).unwrap();
        assert!(store.is_empty());
    }
}
