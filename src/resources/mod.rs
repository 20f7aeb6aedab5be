//! Module handling the resources used for rendering.

mod fonts;

pub use self::fonts::{Font, FontError, FontLoader, FILE_EXTENSION as FONT_FILE_EXTENSION};


use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::util::cache::ThreadSafeCache;


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err: Error + Send + Sync + 'static;

    /// Load a resource of given name.
    fn load(&self, name: &str) -> Result<Self::Item, Self::Err>;
}


/// A loader that keeps an LRU cache of resources previously loaded.
pub struct CachingLoader<L: Loader> {
    inner: L,
    cache: ThreadSafeCache<String, L::Item>,
}

impl<L: Loader> CachingLoader<L> {
    #[inline]
    pub fn new(inner: L, capacity: usize) -> Self {
        CachingLoader {
            inner,
            cache: ThreadSafeCache::new(capacity),
        }
    }

    /// Reference to the internal cache, for examining hit/miss statistics.
    #[inline]
    pub fn cache(&self) -> &ThreadSafeCache<String, L::Item> {
        &self.cache
    }
}

impl<L: Loader> Loader for CachingLoader<L> {
    type Item = Arc<L::Item>;
    type Err = L::Err;

    /// Load the resource from cache, falling back on the wrapped loader
    /// and caching whatever it returns.
    fn load(&self, name: &str) -> Result<Self::Item, Self::Err> {
        if let Some(obj) = self.cache.get(name) {
            return Ok(obj);
        }
        let obj = self.inner.load(name)?;
        Ok(self.cache.put(name.to_owned(), obj))
    }
}

impl<L: Loader> fmt::Debug for CachingLoader<L> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("CachingLoader")
            .field("inner", &"...")
            .field("cache", &self.cache)
            .finish()
    }
}
