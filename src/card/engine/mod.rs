//! Module which defines the card rendering engine.

mod builder;
mod config;

pub use self::builder::{Builder, Error as BuildError};
pub use self::config::Config;


use std::fmt;
use std::path::Path;
use std::sync::Arc;

use antidote::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::StyleParameters;
use crate::resources::{CachingLoader, Font, FontLoader, Loader};
use crate::util::cache::ThreadSafeCache;
use super::error::CardError;
use super::output::CardOutput;
use super::task::CardTask;


/// Card rendering engine.
///
/// The engine is thread-safe (`Send + Sync`) and cheap to `Clone`
/// (it merely clones a shared reference to the underlying state), since
/// rendering is CPU-bound and normally dispatched to background threads.
pub struct Engine<Fl = FontLoader>
    where Fl: Loader<Item = Font>
{
    inner: Arc<Inner<Fl>>,
}

/// Shared state of the engine that card tasks have access to.
pub(super) struct Inner<Fl: Loader<Item = Font>> {
    pub(super) config: RwLock<Config>,
    pub(super) fonts: CachingLoader<Fl>,
}

impl<Fl: Loader<Item = Font>> Inner<Fl> {
    #[inline]
    pub fn new(config: Config, fonts: CachingLoader<Fl>) -> Self {
        Inner { config: RwLock::new(config), fonts }
    }
}

impl<Fl: Loader<Item = Font>> From<Inner<Fl>> for Engine<Fl> {
    fn from(inner: Inner<Fl>) -> Self {
        Engine { inner: Arc::new(inner) }
    }
}

impl<Fl: Loader<Item = Font>> Clone for Engine<Fl> {
    fn clone(&self) -> Self {
        Engine { inner: self.inner.clone() }
    }
}

// Constructors.
impl Engine<FontLoader> {
    /// Create an `Engine` which loads fonts from given directory path.
    ///
    /// Loaded fonts are cached in memory (LRU cache).
    /// For other ways of creating `Engine`, see the `Builder`.
    #[inline]
    pub fn new<D: AsRef<Path>>(font_directory: D) -> Self {
        Builder::new()
            .font_directory(font_directory)
            .build().unwrap()
    }
}
impl<Fl: Loader<Item = Font>> Engine<Fl> {
    /// Create an `Engine` that uses the given loader for fonts.
    #[inline]
    pub fn with_font_loader(font_loader: Fl) -> Self {
        Builder::new()
            .font_loader(font_loader)
            .build().unwrap()
    }
}

// Card rendering.
impl<Fl: Loader<Item = Font>> Engine<Fl> {
    /// Render a card from the given source image and style parameters.
    ///
    /// Rendering is CPU-intensive (decode, blur, composite, encode) and
    /// can take from sub-second to low seconds at high export scales;
    /// callers with an event loop should execute it in a separate thread.
    ///
    /// Every call is independent: no shared mutable state beyond the
    /// internally synchronized font cache, so any number of renders may
    /// run in parallel.
    #[inline]
    pub fn build_card(&self, image: &[u8], style: &StyleParameters)
        -> Result<CardOutput, CardError>
    {
        CardTask::new(image, style, self.inner.clone()).perform()
    }
}

// Managing resources.
impl<Fl: Loader<Item = Font>> Engine<Fl> {
    /// Preemptively load a font into the engine's cache.
    pub fn preload_font(&self, name: &str) -> Result<(), Fl::Err> {
        self.inner.fonts.load(name)?;
        Ok(())
    }

    /// Reference to the internal font cache,
    /// for examining cache statistics (hits & misses).
    pub fn font_cache(&self) -> &ThreadSafeCache<String, Font> {
        self.inner.fonts.cache()
    }
}

// Configuration.
impl<Fl: Loader<Item = Font>> Engine<Fl> {
    /// Read the `Engine`'s configuration.
    #[inline]
    pub fn config(&self) -> RwLockReadGuard<Config> {
        self.inner.config.read()
    }

    /// Modify the `Engine`'s configuration.
    ///
    /// Changes affect future rendering tasks.
    #[inline]
    pub fn config_mut(&self) -> RwLockWriteGuard<Config> {
        self.inner.config.write()
    }
}

impl<Fl: Loader<Item = Font>> fmt::Debug for Engine<Fl> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Engine")
            .field("config", &*self.config())
            .field("fonts", &self.inner.fonts)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::Engine;

    #[test]
    fn thread_safe() {
        fn assert_sync<T: Sync>() {}
        fn assert_send<T: Send>() {}

        assert_sync::<Engine>();
        assert_send::<Engine>();
    }
}
