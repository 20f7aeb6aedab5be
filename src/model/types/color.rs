//! Module implementing the `Color` type.

use std::fmt;
use std::str::FromStr;

use image::{Rgb, Rgba};
use serde::{Serialize, Serializer};
use thiserror::Error;


/// RGB color, as used for the theme accent and palette swatches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Create a white color.
    #[inline]
    pub fn white() -> Self {
        Self::gray(0xff)
    }

    /// Create a black color.
    #[inline]
    pub fn black() -> Self {
        Self::gray(0x00)
    }

    /// Create a gray color of given intensity.
    #[inline]
    pub fn gray(value: u8) -> Self {
        Color(value, value, value)
    }
}

impl Color {
    #[inline]
    pub(crate) fn to_rgb(self) -> Rgb<u8> {
        let Color(r, g, b) = self;
        Rgb([r, g, b])
    }

    #[inline]
    pub(crate) fn to_rgba(self, alpha: u8) -> Rgba<u8> {
        let Color(r, g, b) = self;
        Rgba([r, g, b, alpha])
    }
}

impl From<Color> for Rgb<u8> {
    #[inline]
    fn from(color: Color) -> Rgb<u8> {
        color.to_rgb()
    }
}

impl fmt::Display for Color {
    /// Format the color the way the palette hands it to frontends:
    /// an uppercase `#RRGGBB` string.
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let &Color(r, g, b) = self;
        write!(fmt, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse a CSS color string (`#FFD700`, `gold`, `rgb(...)`, ...).
    ///
    /// Alternative hex prefixes (`0x`, `$`) are accepted for full 24-bit
    /// values, since those show up in user input.
    fn from_str(v: &str) -> Result<Self, Self::Err> {
        let mut s = v.trim().to_lowercase();
        for prefix in ["0x", "$"] {
            if let Some(rest) = s.strip_prefix(prefix) {
                if rest.len() != 6 {
                    return Err(ColorParseError::Css(format!(
                        "ambiguous hex color `{}`", v)));
                }
                s = format!("#{}", rest);
                break;
            }
        }

        let css = csscolorparser::parse(&s)
            .map_err(|e| ColorParseError::Css(e.to_string()))?;
        let [r, g, b, a] = css.to_rgba8();
        if a != 0xff {
            return Err(ColorParseError::Alpha(css.a));
        }
        Ok(Color(r, g, b))
    }
}


/// Error that may occur while parsing a `Color`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ColorParseError {
    /// Invalid CSS color syntax.
    #[error("invalid CSS color: {0}")]
    Css(String),
    /// The color erroneously includes transparency.
    #[error("color transparency not supported (alpha={0})")]
    Alpha(f32),
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use spectral::prelude::*;
    use super::{Color, ColorParseError};

    #[test]
    fn named_colors() {
        assert_that!(Color::from_str("black")).is_ok().is_equal_to(Color(0, 0, 0));
        assert_that!(Color::from_str("white")).is_ok().is_equal_to(Color(0xff, 0xff, 0xff));
        assert_that!(Color::from_str("gold")).is_ok().is_equal_to(Color(0xff, 0xd7, 0x00));
        assert_that!(Color::from_str("tomato")).is_ok().is_equal_to(Color(255, 99, 71));
    }

    #[test]
    fn hex_colors() {
        assert_that!(Color::from_str("#0f0")).is_ok().is_equal_to(Color(0, 0xff, 0));
        assert_that!(Color::from_str("#FFD700")).is_ok().is_equal_to(Color(0xff, 0xd7, 0));
        assert_that!(Color::from_str("0xff0000")).is_ok().is_equal_to(Color(0xff, 0, 0));
        assert_that!(Color::from_str("$0000ff")).is_ok().is_equal_to(Color(0, 0, 0xff));
        // Shorthand hex is only allowed with the standard CSS prefix.
        assert_that!(Color::from_str("0xf0f")).is_err();
        assert_that!(Color::from_str("$ff0")).is_err();
    }

    #[test]
    fn transparency_not_supported() {
        assert_that!(Color::from_str("transparent")).is_err()
            .is_equal_to(ColorParseError::Alpha(0.0));
        assert_that!(Color::from_str("rgba(0, 0, 0, 0.5)")).is_err();
    }

    #[test]
    fn displays_as_uppercase_hex() {
        assert_that!(Color(0xff, 0xd7, 0x00).to_string())
            .is_equal_to("#FFD700".to_string());
        assert_that!(Color::black().to_string()).is_equal_to("#000000".to_string());
    }
}
