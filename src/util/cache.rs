//! Module implementing a thread-safe LRU cache.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use antidote::Mutex;
use lru_cache::LruCache;


/// A thread-safe LRU cache of keys & cached values.
///
/// Values are stored and doled out as `Arc<V>`, so a cached resource can
/// outlive its eviction while a render still holds it. The cache also
/// counts hits & misses for diagnostics.
pub struct ThreadSafeCache<K: Eq + Hash, V> {
    inner: Mutex<LruCache<K, Arc<V>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    /// Create the cache with given capacity.
    pub fn new(capacity: usize) -> Self {
        ThreadSafeCache {
            inner: Mutex::new(LruCache::new(capacity)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }
}

impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    /// Get the element under given key, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
        where K: Borrow<Q>, Q: ?Sized + Eq + Hash
    {
        match self.inner.lock().get_mut(key) {
            Some(v) => { self.hit(); Some(v.clone()) }
            None => { self.miss(); None }
        }
    }

    /// Put an item into the cache under given key.
    ///
    /// Unlike `insert()`, this always returns the (`Arc`'d) value that
    /// ends up under the key, which is convenient for load-then-cache.
    pub fn put(&self, k: K, v: V) -> Arc<V> {
        let value = Arc::new(v);
        self.inner.lock().insert(k, value.clone()).unwrap_or(value)
    }

    /// Insert an item, returning the previously cached value if any.
    pub fn insert(&self, k: K, v: V) -> Option<Arc<V>> {
        self.inner.lock().insert(k, Arc::new(v))
    }

    /// Remove a key from the cache, returning its value if present.
    pub fn remove<Q>(&self, key: &Q) -> Option<Arc<V>>
        where K: Borrow<Q>, Q: ?Sized + Eq + Hash
    {
        self.inner.lock().remove(key)
    }

    /// Cache capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Current size of the cache.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Remove all elements from the cache.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}

// Cache statistics.
impl<K: Eq + Hash, V> ThreadSafeCache<K, V> {
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of cache hits so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of cache misses so far.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

impl<K: Eq + Hash, V> fmt::Debug for ThreadSafeCache<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("ThreadSafeCache");
        ds.field("capacity", &self.capacity());
        ds.field("len", &self.len());
        ds.field("hits", &self.hits());
        ds.field("misses", &self.misses());
        ds.finish()
    }
}


#[cfg(test)]
mod tests {
    use super::ThreadSafeCache;

    #[test]
    fn counts_hits_and_misses() {
        let cache: ThreadSafeCache<String, u32> = ThreadSafeCache::new(2);
        assert!(cache.get("a").is_none());
        cache.put("a".into(), 42);
        assert_eq!(*cache.get("a").unwrap(), 42);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache: ThreadSafeCache<String, u32> = ThreadSafeCache::new(2);
        cache.put("a".into(), 1);
        cache.put("b".into(), 2);
        cache.get("a");
        cache.put("c".into(), 3);  // evicts "b"
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.len(), 2);
    }
}
