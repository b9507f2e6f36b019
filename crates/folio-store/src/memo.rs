//! Bounded memo caches keyed by input identity.
//!
//! A key holds the `Arc`s it was built from, so an allocation cannot be
//! freed and its address reused while the entry is cached.

use std::convert::Infallible;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;

/// Compares and hashes by allocation, never by value.
pub struct Identity<T>(Arc<T>);

impl<T> Identity<T> {
    #[must_use]
    pub fn of(value: &Arc<T>) -> Self {
        Self(Arc::clone(value))
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for Identity<T> {}

impl<T> Hash for Identity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

/// Occupancy of one memo cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub len: usize,
    pub capacity: usize,
}

pub struct MemoCache<K: Hash + Eq, V> {
    name: &'static str,
    entries: Mutex<LruCache<K, Arc<V>>>,
}

impl<K: Hash + Eq, V> MemoCache<K, V> {
    /// A zero capacity is raised to one.
    #[must_use]
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.lock().get(key).cloned()
    }

    /// Return the cached value for `key`, computing it on a miss.
    ///
    /// `compute` runs without the lock held. If another caller filled the
    /// slot in the meantime, the earlier value is kept and returned.
    ///
    /// # Errors
    ///
    /// Propagates the error from `compute`; nothing is cached in that case.
    pub fn try_get_or_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        tracing::debug!(cache = self.name, "memo miss");

        let value = Arc::new(compute()?);
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(&key) {
            return Ok(Arc::clone(existing));
        }
        if entries.push(key, Arc::clone(&value)).is_some() {
            tracing::trace!(cache = self.name, "evicted least recently used entry");
        }
        Ok(value)
    }

    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        match self.try_get_or_insert_with(key, || Ok::<_, Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            len: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identity_ignores_value_equality() {
        let a = Arc::new(1);
        let b = Arc::new(1);
        assert!(Identity::of(&a) == Identity::of(&a));
        assert!(Identity::of(&a) != Identity::of(&b));
    }

    #[test]
    fn same_key_returns_same_allocation() {
        let cache: MemoCache<Identity<u32>, String> = MemoCache::new("test", 4);
        let input = Arc::new(7);

        let first = cache.get_or_insert_with(Identity::of(&input), || "seven".to_string());
        let second = cache.get_or_insert_with(Identity::of(&input), || unreachable!());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { len: 1, capacity: 4 });
    }

    #[test]
    fn failed_compute_caches_nothing() {
        let cache: MemoCache<u8, u8> = MemoCache::new("test", 2);
        let result = cache.try_get_or_insert_with(1, || Err::<u8, _>("boom"));
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(cache.stats().len, 0);
    }

    #[test]
    fn capacity_bounds_entries() {
        let cache: MemoCache<u8, u8> = MemoCache::new("test", 2);
        for n in 0..5 {
            cache.get_or_insert_with(n, || n);
        }
        assert_eq!(cache.stats().len, 2);
        assert!(cache.get(&0).is_none());
        assert_eq!(cache.get(&4).as_deref(), Some(&4));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let cache: MemoCache<u8, u8> = MemoCache::new("test", 0);
        assert_eq!(cache.stats().capacity, 1);
    }
}
