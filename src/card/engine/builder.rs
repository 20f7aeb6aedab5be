//! Module implementing the builder for `Engine`.

use std::path::Path;

use thiserror::Error;

use crate::resources::{CachingLoader, Font, FontLoader, Loader};
use super::config::Config;
use super::{Engine, Inner};


const DEFAULT_FONT_CAPACITY: usize = 8;


/// Builder for `Engine`.
#[derive(Debug)]
#[must_use = "unused builder which must be used"]
pub struct Builder<Fl = FontLoader>
    where Fl: Loader<Item = Font>
{
    font_loader: Option<Fl>,
    font_cache_size: usize,
    config: Config,
}

impl<Fl: Loader<Item = Font>> Default for Builder<Fl> {
    fn default() -> Self {
        Builder {
            font_loader: None,
            font_cache_size: DEFAULT_FONT_CAPACITY,
            config: Config::default(),
        }
    }
}

impl<Fl: Loader<Item = Font>> Builder<Fl> {
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}

// Font setup.
impl Builder<FontLoader> {
    /// Set the directory where the fonts will be loaded from.
    #[inline]
    pub fn font_directory<P: AsRef<Path>>(self, directory: P) -> Self {
        self.font_loader(FontLoader::new(directory))
    }
}
impl<Fl: Loader<Item = Font>> Builder<Fl> {
    /// Set a custom loader for fonts.
    ///
    /// Fonts loaded by it will still be cached in an LRU cache.
    #[inline]
    pub fn font_loader(mut self, loader: Fl) -> Self {
        self.font_loader = Some(loader); self
    }

    /// Change the size of the font cache.
    #[inline]
    pub fn font_cache_size(mut self, size: usize) -> Self {
        self.font_cache_size = size; self
    }
}

// Config overrides.
impl<Fl: Loader<Item = Font>> Builder<Fl> {
    /// Set the export scale multiplier of rendered cards.
    #[inline]
    pub fn export_scale(mut self, scale: u32) -> Self {
        self.config.export_scale = scale.max(1); self
    }

    /// Set the background blur sigma (at 1x scale).
    #[inline]
    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.config.blur_sigma = sigma; self
    }

    /// Set the cap on rendered prompt lines.
    #[inline]
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.config.max_lines = max_lines.max(1); self
    }
}

// Validation & building.
impl<Fl: Loader<Item = Font>> Builder<Fl> {
    /// Build the `Engine`.
    pub fn build(self) -> Result<Engine<Fl>, Error> {
        let fonts = CachingLoader::new(
            self.font_loader.ok_or(Error::NoFontLoader)?,
            self.font_cache_size);
        Ok(Engine::from(Inner::new(self.config, fonts)))
    }
}


/// Error that resulted from misconfiguration of the `Engine` via its `Builder`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No font source configured.
    #[error("no font directory or loader configured")]
    NoFontLoader,
}
