//! Horizontal alignment of a text block.

use serde::{Deserialize, Serialize};


/// Horizontal alignment of the prompt text block.
///
/// Only honored by the in-browser preview; the raster renderer
/// always lays the prompt block out left-aligned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash,
         Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}
