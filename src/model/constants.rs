//! Constants shared by the whole data model and both rendering paths.
//!
//! The geometry formulas of the compositor are deliberately expressed
//! through the constants here; the in-browser preview mirrors the same
//! numbers, and any divergence between the two renderers is a bug.

use super::types::{Color, FontFamily};


/// Nominal card width, in pixels (9:16 aspect).
pub const CARD_WIDTH: u32 = 1080;
/// Nominal card height, in pixels.
pub const CARD_HEIGHT: u32 = 1920;

/// Default multiplier for the final raster dimensions.
///
/// The Telegram delivery path uses 4 (4320x7680 output).
pub const DEFAULT_EXPORT_SCALE: u32 = 1;

/// Brand accent color (also the last-resort palette swatch).
pub const BRAND_COLOR: Color = Color(0xff, 0xd7, 0x00);

/// Divisor turning a safe zone scale percentage into a fraction of
/// canvas width: `margin = width * scale / 400` (so 25% -> width/16).
pub const SAFE_ZONE_DIVISOR: f32 = 400.0;

// Prompt text metrics.
/// Hard cap on the number of rendered prompt lines; overflow is dropped.
pub const MAX_PROMPT_LINES: usize = 15;
/// Average glyph advance as a fraction of font size, used by the
/// character-count wrapping heuristic.
pub const CHAR_WIDTH_RATIO: f32 = 0.55;
/// Line pitch as a fraction of font size.
pub const LINE_HEIGHT_RATIO: f32 = 1.4;
/// Fraction of the main image width available to the text block.
pub const TEXT_BLOCK_WIDTH_RATIO: f32 = 0.8;
/// Bounds for the user-chosen prompt font size (in points).
pub const MIN_FONT_SIZE: u8 = 10;
pub const MAX_FONT_SIZE: u8 = 72;

// Overlay geometry (all in unscaled canvas pixels).
/// Padding between canvas edges and overlay content, before the safe zone
/// margin is added on top of it.
pub const BASE_PADDING: u32 = 60;
/// Vertical room reserved above the prompt block for the badge and label.
pub const LABEL_BLOCK_HEIGHT: u32 = 120;
/// First prompt line baseline offset below the top of the prompt block.
pub const PROMPT_BASELINE_OFFSET: u32 = 30;

// Model badge.
pub const BADGE_HEIGHT: u32 = 42;
pub const BADGE_CHAR_WIDTH: u32 = 18;
pub const BADGE_PADDING: u32 = 32;
pub const BADGE_TEXT_INSET: u32 = 16;
pub const BADGE_FONT_SIZE: u32 = 22;
/// Badge top relative to the top of the prompt block.
pub const BADGE_RAISE: u32 = 130;
/// Badge text baseline relative to the top of the prompt block.
pub const BADGE_BASELINE_RAISE: u32 = 100;
pub const BADGE_CORNER_RADIUS: u32 = 8;

// Branding.
/// Font family for the wordmark, badge and "PROMPT" label. The
/// user-selected family applies to the prompt lines only.
pub const BRANDING_FONT_FAMILY: FontFamily = FontFamily::Sans;
pub const WORDMARK_LEFT: &str = "PROMT";
pub const WORDMARK_RIGHT: &str = "HUBS";
pub const WORDMARK_FONT_SIZE: u32 = 32;
/// Wordmark baseline below the padded top edge.
pub const WORDMARK_DROP: u32 = 40;
pub const PROMPT_LABEL: &str = "PROMPT";
pub const PROMPT_LABEL_FONT_SIZE: u32 = 56;
/// "PROMPT" label baseline above the top of the prompt block.
pub const PROMPT_LABEL_RAISE: u32 = 30;

// Border frame.
pub const BORDER_INSET: u32 = 20;
pub const BORDER_RADIUS: u32 = 24;
pub const BORDER_WIDTH: u32 = 2;

// Background treatment.
pub const BACKGROUND_BLUR_SIGMA: f32 = 30.0;
pub const BACKGROUND_BRIGHTNESS: f32 = 0.5;
pub const BACKGROUND_SATURATION: f32 = 1.1;

// Gradient overlay: opaque at the bottom of the main image, with a mid
// stop holding a fraction of the peak for a non-linear falloff.
pub const GRADIENT_MID_STOP: f32 = 0.35;
pub const GRADIENT_MID_FRACTION: f32 = 0.7;

// Text shadow (stands in for the preview's CSS `text-shadow`).
pub const TEXT_SHADOW_OFFSET: f32 = 2.0;
pub const TEXT_SHADOW_ALPHA: f32 = 0.9;
