//! Module for loading the fonts used on cards.

use std::fmt;
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use super::Loader;


pub const FILE_EXTENSION: &str = "ttf";


/// Font that can be used to render card text.
pub struct Font(rusttype::Font<'static>);

impl Deref for Font {
    type Target = rusttype::Font<'static>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Font {
    /// Parse a font out of the bytes of a TTF file.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        rusttype::Font::try_from_vec(bytes).map(Font)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font(...)")
    }
}


/// Error that may occur while loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("cannot read font file `{path}`")]
    Io {
        path: PathBuf,
        #[source] source: io::Error,
    },
    #[error("font file `{path}` is not a usable TTF font")]
    Invalid { path: PathBuf },
}


/// Loader of `<name>.ttf` files from a fonts directory.
#[derive(Debug)]
pub struct FontLoader {
    directory: PathBuf,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader { directory: directory.as_ref().to_owned() }
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.directory.join(name).with_extension(FILE_EXTENSION)
    }
}

impl Loader for FontLoader {
    type Item = Font;
    type Err = FontError;

    fn load(&self, name: &str) -> Result<Font, Self::Err> {
        let path = self.path_of(name);
        let bytes = fs::read(&path)
            .map_err(|source| FontError::Io { path: path.clone(), source })?;
        let font = Font::from_bytes(bytes)
            .ok_or(FontError::Invalid { path })?;
        debug!("Font `{}` loaded successfully", name);
        Ok(font)
    }
}


#[cfg(test)]
mod tests {
    use super::{FontError, FontLoader};
    use crate::resources::Loader;

    #[test]
    fn missing_font_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FontLoader::new(dir.path());
        match loader.load("NoSuchFont") {
            Err(FontError::Io { path, .. }) => {
                assert!(path.ends_with("NoSuchFont.ttf"));
            }
            other => panic!("expected Io error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn garbage_file_is_not_a_font() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Broken.ttf"), b"not a font").unwrap();
        let loader = FontLoader::new(dir.path());
        assert!(matches!(loader.load("Broken"), Err(FontError::Invalid { .. })));
    }
}
