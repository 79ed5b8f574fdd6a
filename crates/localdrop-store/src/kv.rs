//! String key/value storage seam.

use std::collections::HashMap;

use crate::database::Database;
use crate::error::Result;

/// Synchronous string-to-string store that survives restarts (or not, for
/// [`MemoryStore`]).
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl KvStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)
    }
}

/// In-process store used by tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &mut dyn KvStore) {
        assert_eq!(store.get("profileName").unwrap(), None);
        store.set("profileName", "Alice").unwrap();
        store.set("profileName", "Bob").unwrap();
        assert_eq!(store.get("profileName").unwrap().as_deref(), Some("Bob"));
    }

    #[test]
    fn memory_store_contract() {
        let mut store = MemoryStore::new();
        exercise(&mut store);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn database_store_contract() {
        let mut db = Database::open_in_memory().unwrap();
        exercise(&mut db);
    }

    #[test]
    fn boxed_store_delegates() {
        let mut boxed: Box<dyn KvStore> = Box::new(MemoryStore::new());
        exercise(&mut boxed);
    }
}
