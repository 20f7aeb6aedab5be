//! Module with the model types themselves.

mod align;
mod color;
mod style;

pub use self::align::HAlign;
pub use self::color::Color;
pub use self::style::{Builder as StyleBuilder,
                      Error as StyleError,
                      FontFamily, Model, StyleParameters};
