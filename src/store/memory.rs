//! In-memory store.

use im::OrdMap;

use super::{KvStore, StoreKey};

/// `KvStore` backed by a persistent ordered map.
///
/// Clones share structure, so snapshotting before an operation is cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: OrdMap<StoreKey, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in order: system info first, then games by id.
    pub fn keys(&self) -> impl Iterator<Item = &StoreKey> {
        self.entries.keys()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &StoreKey) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: StoreKey, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    fn delete(&mut self, key: &StoreKey) {
        self.entries.remove(key);
    }
}
