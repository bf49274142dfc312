//! Write-buffering overlay.
//!
//! Reads fall through to the parent unless the key was written in this
//! overlay. `commit` applies every buffered write to the parent; dropping the
//! overlay discards them.

use im::OrdMap;

use super::{KvStore, StoreKey};

/// Buffered view over a parent store. `None` marks a pending delete.
pub struct CacheStore<'a, S: KvStore + ?Sized> {
    parent: &'a mut S,
    pending: OrdMap<StoreKey, Option<Vec<u8>>>,
}

impl<'a, S: KvStore + ?Sized> CacheStore<'a, S> {
    pub fn new(parent: &'a mut S) -> Self {
        Self {
            parent,
            pending: OrdMap::new(),
        }
    }

    /// Number of keys with a buffered write or delete.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Apply buffered writes to the parent.
    pub fn commit(self) {
        let Self { parent, pending } = self;
        for (key, value) in pending.iter() {
            match value {
                Some(bytes) => parent.set(key.clone(), bytes.clone()),
                None => parent.delete(key),
            }
        }
    }

    /// Drop buffered writes. Equivalent to letting the overlay go out of scope.
    pub fn discard(self) {}
}

impl<S: KvStore + ?Sized> KvStore for CacheStore<'_, S> {
    fn get(&self, key: &StoreKey) -> Option<Vec<u8>> {
        match self.pending.get(key) {
            Some(pending) => pending.clone(),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: StoreKey, value: Vec<u8>) {
        self.pending.insert(key, Some(value));
    }

    fn delete(&mut self, key: &StoreKey) {
        self.pending.insert(key.clone(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameId;
    use crate::store::MemoryStore;

    fn key(id: u64) -> StoreKey {
        StoreKey::Game(GameId::new(id))
    }

    #[test]
    fn test_reads_fall_through() {
        let mut parent = MemoryStore::new();
        parent.set(key(1), vec![1]);

        let cache = CacheStore::new(&mut parent);
        assert_eq!(cache.get(&key(1)), Some(vec![1]));
        assert_eq!(cache.get(&key(2)), None);
    }

    #[test]
    fn test_commit_applies_writes() {
        let mut parent = MemoryStore::new();
        parent.set(key(1), vec![1]);
        parent.set(key(2), vec![2]);

        let mut cache = CacheStore::new(&mut parent);
        cache.set(key(1), vec![10]);
        cache.delete(&key(2));
        cache.set(key(3), vec![3]);
        assert_eq!(cache.get(&key(1)), Some(vec![10]));
        assert_eq!(cache.get(&key(2)), None);
        assert_eq!(cache.pending_writes(), 3);
        cache.commit();

        assert_eq!(parent.get(&key(1)), Some(vec![10]));
        assert_eq!(parent.get(&key(2)), None);
        assert_eq!(parent.get(&key(3)), Some(vec![3]));
    }

    #[test]
    fn test_discard_leaves_parent_untouched() {
        let mut parent = MemoryStore::new();
        parent.set(key(1), vec![1]);
        let before = parent.clone();

        let mut cache = CacheStore::new(&mut parent);
        cache.set(key(1), vec![9]);
        cache.delete(&key(1));
        cache.set(key(4), vec![4]);
        cache.discard();

        assert_eq!(parent, before);
    }

    #[test]
    fn test_nested_overlays() {
        let mut parent = MemoryStore::new();
        let mut outer = CacheStore::new(&mut parent);
        outer.set(key(1), vec![1]);
        {
            let mut inner = CacheStore::new(&mut outer);
            assert_eq!(inner.get(&key(1)), Some(vec![1]));
            inner.set(key(2), vec![2]);
            inner.commit();
        }
        assert_eq!(outer.get(&key(2)), Some(vec![2]));
        outer.commit();
        assert_eq!(parent.len(), 2);
    }
}
