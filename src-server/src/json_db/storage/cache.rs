// FICHIER : src-server/src/json_db/storage/cache.rs

//! Cache LRU (Least Recently Used) thread-safe placé devant le disque.

use lru::LruCache;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug, Clone)]
pub struct Cache<K: Hash + Eq, V> {
    // Mutex : LruCache::get réordonne les entrées (promotion MRU).
    store: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut guard = self.store.lock().ok()?;
        guard.get(key).cloned()
    }

    pub fn put(&self, key: K, value: V) {
        if let Ok(mut guard) = self.store.lock() {
            guard.put(key, value);
        }
    }

    pub fn remove(&self, key: &K) {
        if let Ok(mut guard) = self.store.lock() {
            guard.pop(key);
        }
    }

    /// Éjecte toutes les entrées dont la clé satisfait le prédicat
    /// (ex: tous les documents d'une collection supprimée).
    pub fn remove_matching<F>(&self, predicate: F) -> usize
    where
        F: Fn(&K) -> bool,
    {
        let Ok(mut guard) = self.store.lock() else {
            return 0;
        };
        let doomed: Vec<K> = guard
            .iter()
            .filter(|(k, _)| predicate(k))
            .map(|(k, _)| k.clone())
            .collect();
        for key in &doomed {
            guard.pop(key);
        }
        doomed.len()
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.store.lock() {
            guard.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.store.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
