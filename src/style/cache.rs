use fxhash::FxHashMap;
use std::collections::VecDeque;
use std::hash::Hash;

use crate::core::constants::MAX_CACHE_SIZE;

/// Bounded style cache with strict FIFO eviction.
///
/// Insertion order is the only metadata kept: a hit does not refresh an
/// entry. The key space is narrow (sub-category x quantized resolution), so
/// this is enough to keep the hit rate high without LRU bookkeeping.
#[derive(Debug)]
pub struct StyleCache<K, V> {
    entries: FxHashMap<K, V>,
    order: VecDeque<K>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K, V> StyleCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries (0 falls back to the default).
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 { MAX_CACHE_SIZE } else { capacity };
        Self {
            entries: FxHashMap::default(),
            order: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(MAX_CACHE_SIZE)
    }

    /// Return the cached value for `key`, computing and inserting it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.entries.get(&key) {
            self.hits += 1;
            return value.clone();
        }

        self.misses += 1;
        let value = compute();

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value.clone());
        value
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_hit_skips_compute() {
        let mut cache: StyleCache<u32, u32> = StyleCache::new(4);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            42
        };

        assert_eq!(cache.get_or_insert_with(1, compute), 42);
        assert_eq!(cache.get_or_insert_with(1, || unreachable!()), 42);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.stats(), CacheStats { entries: 1, hits: 1, misses: 1 });
    }

    #[test]
    fn test_bound_evicts_oldest_inserted() {
        let capacity = 10;
        let extra = 3;
        let mut cache: StyleCache<usize, usize> = StyleCache::new(capacity);

        for key in 0..capacity + extra {
            cache.get_or_insert_with(key, || key * 2);
        }

        assert_eq!(cache.len(), capacity);
        for key in 0..extra {
            assert!(!cache.contains(&key), "key {key} should be evicted");
        }
        for key in extra..capacity + extra {
            assert!(cache.contains(&key));
        }
    }

    #[test]
    fn test_eviction_is_fifo_not_lru() {
        let mut cache: StyleCache<&str, u8> = StyleCache::new(2);
        cache.get_or_insert_with("a", || 1);
        cache.get_or_insert_with("b", || 2);
        // A hit on "a" must not protect it.
        cache.get_or_insert_with("a", || unreachable!());
        cache.get_or_insert_with("c", || 3);

        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn test_clear_forces_recompute() {
        let mut cache: StyleCache<u8, u8> = StyleCache::new(2);
        cache.get_or_insert_with(1, || 10);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_insert_with(1, || 20), 20);
    }

    #[test]
    fn test_zero_capacity_falls_back_to_default() {
        let cache: StyleCache<u8, u8> = StyleCache::new(0);
        assert_eq!(cache.capacity(), MAX_CACHE_SIZE);
    }

    #[test]
    fn test_default_capacity_matches_constant() {
        let mut cache: StyleCache<u8, u8> = StyleCache::with_default_capacity();
        assert_eq!(cache.capacity(), MAX_CACHE_SIZE);
        assert!(cache.is_empty());
        cache.get_or_insert_with(1, || 1);
        assert_eq!(cache.len(), 1);
    }
}
