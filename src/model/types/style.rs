//! Module implementing `StyleParameters` and its builder.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::model::constants::{BRAND_COLOR, MAX_FONT_SIZE, MIN_FONT_SIZE};
use super::align::HAlign;
use super::color::Color;


/// The AI model advertised on the card's badge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Model {
    #[default]
    Gemini,
    #[serde(rename = "GPT-4")]
    Gpt4,
    /// No badge at all.
    None,
}

impl Model {
    /// The badge label, or `None` when the badge is suppressed.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Model::Gemini => Some("GEMINI"),
            Model::Gpt4 => Some("GPT-4"),
            Model::None => None,
        }
    }
}


/// Font stack used for the prompt text.
///
/// Each family maps to a fixed font resource name that the engine's
/// font loader resolves to an actual TTF file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Mono,
    Sans,
    Serif,
}

impl FontFamily {
    /// Name of the font resource backing this family.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFamily::Mono => "JetBrainsMono",
            FontFamily::Sans => "Inter",
            FontFamily::Serif => "PlayfairDisplay",
        }
    }
}


/// Style parameters of a single card render. Used as an input structure.
///
/// Constructed fresh per render request (from UI state or a bot session)
/// and discarded after use. Deserializes from the web editor's camelCase
/// JSON, with every field optional and defaulting to the editor's
/// initial state.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct StyleParameters {
    /// User-entered prompt text; may contain arbitrary Unicode.
    pub prompt_text: String,
    /// Accent color for the border, badge and wordmark highlight.
    pub theme_color: Color,
    /// Model badge selection.
    pub model: Model,
    /// Font stack for the prompt text.
    pub font_family: FontFamily,
    /// Prompt font size in points, within [10, 72].
    pub font_size: u8,
    /// Prompt block alignment (preview only; the raster path left-aligns).
    pub alignment: HAlign,
    /// Extra vertical offset of the prompt block (preview only).
    pub text_position: i32,
    /// Draw the themed rounded border frame.
    pub show_border: bool,
    /// Draw the wrapped prompt lines.
    pub show_text: bool,
    /// Blur the letterbox background (only visible with `safe_zone`).
    pub blur_background: bool,
    /// Inset the main image, exposing the letterbox background.
    pub safe_zone: bool,
    /// Safe zone margin as a percentage of its base size, in [0, 100].
    pub safe_zone_scale: u8,
    /// Show the bare image: no gradient, text or border layers.
    pub show_original_only: bool,
    /// Peak darkness of the bottom-up gradient, as a percentage.
    pub gradient_intensity: u8,
}

impl Default for StyleParameters {
    /// The web editor's initial state.
    fn default() -> Self {
        StyleParameters {
            prompt_text: String::new(),
            theme_color: BRAND_COLOR,
            model: Model::default(),
            font_family: FontFamily::default(),
            font_size: 36,
            alignment: HAlign::default(),
            text_position: 0,
            show_border: true,
            show_text: true,
            blur_background: true,
            safe_zone: true,
            safe_zone_scale: 25,
            show_original_only: false,
            gradient_intensity: 100,
        }
    }
}


/// Builder for `StyleParameters`, validating the numeric ranges.
#[derive(Clone, Debug, Default)]
#[must_use = "unused builder which must be used"]
pub struct Builder {
    style: StyleParameters,
}

impl Builder {
    /// Create a new `Builder` starting from the default style.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

// Setters.
impl Builder {
    #[inline]
    pub fn prompt_text<S: Into<String>>(mut self, text: S) -> Self {
        self.style.prompt_text = text.into(); self
    }

    #[inline]
    pub fn theme_color(mut self, color: Color) -> Self {
        self.style.theme_color = color; self
    }

    #[inline]
    pub fn model(mut self, model: Model) -> Self {
        self.style.model = model; self
    }

    #[inline]
    pub fn font_family(mut self, family: FontFamily) -> Self {
        self.style.font_family = family; self
    }

    #[inline]
    pub fn font_size(mut self, size: u8) -> Self {
        self.style.font_size = size; self
    }

    #[inline]
    pub fn alignment(mut self, align: HAlign) -> Self {
        self.style.alignment = align; self
    }

    #[inline]
    pub fn text_position(mut self, offset: i32) -> Self {
        self.style.text_position = offset; self
    }

    #[inline]
    pub fn show_border(mut self, show: bool) -> Self {
        self.style.show_border = show; self
    }

    #[inline]
    pub fn show_text(mut self, show: bool) -> Self {
        self.style.show_text = show; self
    }

    #[inline]
    pub fn blur_background(mut self, blur: bool) -> Self {
        self.style.blur_background = blur; self
    }

    #[inline]
    pub fn safe_zone(mut self, enabled: bool) -> Self {
        self.style.safe_zone = enabled; self
    }

    #[inline]
    pub fn safe_zone_scale(mut self, scale: u8) -> Self {
        self.style.safe_zone_scale = scale; self
    }

    #[inline]
    pub fn show_original_only(mut self, original: bool) -> Self {
        self.style.show_original_only = original; self
    }

    #[inline]
    pub fn gradient_intensity(mut self, intensity: u8) -> Self {
        self.style.gradient_intensity = intensity; self
    }
}

impl Builder {
    /// Build the resulting `StyleParameters`.
    pub fn build(self) -> Result<StyleParameters, Error> {
        self.validate()?;
        Ok(self.style)
    }

    #[doc(hidden)]
    fn validate(&self) -> Result<(), Error> {
        let s = &self.style;
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&s.font_size) {
            return Err(Error::FontSize(s.font_size));
        }
        if s.safe_zone_scale > 100 {
            return Err(Error::SafeZoneScale(s.safe_zone_scale));
        }
        if s.gradient_intensity > 100 {
            return Err(Error::GradientIntensity(s.gradient_intensity));
        }
        Ok(())
    }
}


/// Error while building `StyleParameters`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("font size {0} outside of [{min}, {max}]",
            min = MIN_FONT_SIZE, max = MAX_FONT_SIZE)]
    FontSize(u8),
    #[error("safe zone scale {0}% > 100%")]
    SafeZoneScale(u8),
    #[error("gradient intensity {0}% > 100%")]
    GradientIntensity(u8),
}


impl fmt::Display for Model {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Model::Gemini => write!(fmt, "Gemini"),
            Model::Gpt4 => write!(fmt, "GPT-4"),
            Model::None => write!(fmt, "None"),
        }
    }
}
