// Storage abstraction for the contact and quick-message collections
//
// Keys are entry ids, values are JSON. Each collection gets its own tree in
// one sled database; MemoryStorage backs the tests.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::CoreError;

pub trait StorageBackend: Send + Sync {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), CoreError>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
    /// Every stored entry, in key order.
    fn iter_all(&self) -> Result<Vec<(String, Vec<u8>)>, CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
    fn flush(&self) -> Result<(), CoreError>;
}

/// Open (or create) the database file holding every collection.
pub fn open_database(path: &Path) -> Result<sled::Db, CoreError> {
    sled::open(path).map_err(CoreError::from)
}

/// In-memory storage for tests and dry runs.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), CoreError> {
        self.data
            .write()
            .map_err(|e| CoreError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self
            .data
            .read()
            .map_err(|e| CoreError::Storage(e.to_string()))?
            .get(key)
            .cloned())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.data
            .write()
            .map_err(|e| CoreError::Storage(e.to_string()))?
            .remove(key);
        Ok(())
    }

    fn iter_all(&self) -> Result<Vec<(String, Vec<u8>)>, CoreError> {
        Ok(self
            .data
            .read()
            .map_err(|e| CoreError::Storage(e.to_string()))?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.data
            .write()
            .map_err(|e| CoreError::Storage(e.to_string()))?
            .clear();
        Ok(())
    }

    fn flush(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// One named tree inside the shared sled database.
pub struct SledStorage {
    tree: sled::Tree,
}

impl SledStorage {
    pub fn tree(db: &sled::Db, name: &str) -> Result<Self, CoreError> {
        let tree = db.open_tree(name)?;
        Ok(Self { tree })
    }
}

impl StorageBackend for SledStorage {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), CoreError> {
        self.tree.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.tree.get(key.as_bytes())?.map(|ivec| ivec.to_vec()))
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.tree.remove(key.as_bytes())?;
        Ok(())
    }

    fn iter_all(&self) -> Result<Vec<(String, Vec<u8>)>, CoreError> {
        let mut results = Vec::new();
        for item in self.tree.iter() {
            let (k, v) = item?;
            let key = String::from_utf8_lossy(&k).into_owned();
            results.push((key, v.to_vec()));
        }
        Ok(results)
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.tree.clear()?;
        Ok(())
    }

    fn flush(&self) -> Result<(), CoreError> {
        self.tree.flush()?;
        Ok(())
    }
}
