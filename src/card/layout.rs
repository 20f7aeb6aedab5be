//! Module computing the card's layer geometry.
//!
//! Every formula here is the single source of truth shared (by mirroring)
//! with the in-browser preview renderer. All outputs are in final raster
//! pixels, i.e. already multiplied by the export scale.

use crate::model::constants::*;
use crate::model::StyleParameters;
use crate::text;


/// Axis-aligned pixel rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// A rectangle with fractional coordinates, for stroked shapes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Where a line of text goes: anchor point (interpretation depends on
/// alignment), glyph baseline and pixel size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextAnchor {
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
}

/// Geometry of the model badge pill.
#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub rect: RectF,
    pub corner_radius: f32,
    pub label: &'static str,
    pub text: TextAnchor,
}

/// Geometry of the rounded border frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Border {
    pub rect: RectF,
    pub radius: f32,
    pub stroke: f32,
}


/// The complete layer geometry of one card render.
///
/// Suppression rules are already applied: a `None` badge or border, an
/// empty `gradient_peak`, or `show_prompt_lines == false` mean the
/// corresponding element simply isn't drawn.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Export scale the geometry was computed at.
    pub scale: u32,
    /// Final raster dimensions (nominal canvas times export scale).
    pub width: u32,
    pub height: u32,
    /// Safe zone margin on each side of the main image.
    pub margin: u32,
    /// The main image rectangle.
    pub main: Rect,
    /// Distance between canvas edges and overlay content.
    pub padding: f32,
    /// Whether the gradient/text/border layers are present at all.
    pub overlay: bool,

    /// Peak opacity of the gradient overlay, in [0, 1].
    pub gradient_peak: f32,

    /// Prompt font size in raster pixels.
    pub font_px: f32,
    /// Vertical pitch between prompt lines.
    pub line_height: f32,
    /// Cleaned and wrapped prompt lines (always computed, so that the
    /// badge stays anchored consistently even when the text is hidden).
    pub lines: Vec<String>,
    /// Whether the prompt lines are actually drawn.
    pub show_prompt_lines: bool,
    /// Top of the prompt block.
    pub prompt_start_y: f32,

    /// Right-aligned wordmark anchor in the top corner.
    pub wordmark: TextAnchor,
    /// The big "PROMPT" label above the prompt lines.
    pub prompt_label: TextAnchor,
    /// Model badge, if any.
    pub badge: Option<Badge>,
    /// Border frame, if any.
    pub border: Option<Border>,
}

impl Layout {
    /// Safe zone margin for a canvas of given (scaled) width:
    /// `width * scale% / 400`, rounded half away from zero.
    /// Zero whenever the safe zone is disabled or scaled to nothing.
    ///
    /// The scale is clamped to 100%: deserialized style parameters skip
    /// the builder's validation, and a margin larger than the canvas
    /// would underflow the main rectangle.
    pub fn safe_zone_margin(canvas_width: u32, safe_zone: bool, scale_pct: u8) -> u32 {
        if !safe_zone {
            return 0;
        }
        let scale_pct = scale_pct.min(100);
        (canvas_width as f32 * scale_pct as f32 / SAFE_ZONE_DIVISOR).round() as u32
    }

    /// Compute the full layer geometry for given style parameters.
    pub fn compute(style: &StyleParameters, export_scale: u32, max_lines: usize) -> Layout {
        let scale = export_scale.max(1);
        let s = |v: u32| (v * scale) as f32;

        let width = CARD_WIDTH * scale;
        let height = CARD_HEIGHT * scale;
        let overlay = !style.show_original_only;
        // "Original only" exports the full-bleed photo: no safe zone
        // insets, on top of hiding every overlay layer.
        let margin = if overlay {
            Self::safe_zone_margin(width, style.safe_zone, style.safe_zone_scale)
        } else {
            0
        };
        let main = Rect {
            x: margin,
            y: margin,
            width: width - 2 * margin,
            height: height - 2 * margin,
        };
        let padding = s(BASE_PADDING) + margin as f32;

        let font_px = style.font_size as f32 * scale as f32;
        let cleaned = text::clean(&style.prompt_text);
        let max_chars = text::max_chars_per_line(main.width as f32, font_px);
        let lines = text::wrap(&cleaned, max_chars, max_lines);

        let line_height = font_px * LINE_HEIGHT_RATIO;
        let text_height = lines.len() as f32 * line_height;
        let prompt_start_y =
            height as f32 - padding - text_height - s(LABEL_BLOCK_HEIGHT);

        let badge = match (overlay, style.model.label()) {
            (true, Some(label)) => Some(Badge {
                rect: RectF {
                    x: padding,
                    y: prompt_start_y - s(BADGE_RAISE),
                    width: label.chars().count() as f32 * s(BADGE_CHAR_WIDTH)
                        + s(BADGE_PADDING),
                    height: s(BADGE_HEIGHT),
                },
                corner_radius: s(BADGE_CORNER_RADIUS),
                label,
                text: TextAnchor {
                    x: padding + s(BADGE_TEXT_INSET),
                    baseline: prompt_start_y - s(BADGE_BASELINE_RAISE),
                    size: s(BADGE_FONT_SIZE),
                },
            }),
            _ => None,
        };

        let border = (overlay && style.show_border).then(|| Border {
            rect: RectF {
                x: main.x as f32 + s(BORDER_INSET),
                y: main.y as f32 + s(BORDER_INSET),
                width: main.width as f32 - 2.0 * s(BORDER_INSET),
                height: main.height as f32 - 2.0 * s(BORDER_INSET),
            },
            radius: s(BORDER_RADIUS),
            stroke: s(BORDER_WIDTH),
        });

        Layout {
            scale,
            width,
            height,
            margin,
            main,
            padding,
            overlay,
            gradient_peak: if overlay {
                style.gradient_intensity.min(100) as f32 / 100.0
            } else {
                0.0
            },
            font_px,
            line_height,
            lines,
            show_prompt_lines: overlay && style.show_text,
            prompt_start_y,
            wordmark: TextAnchor {
                x: width as f32 - padding,
                baseline: padding + s(WORDMARK_DROP),
                size: s(WORDMARK_FONT_SIZE),
            },
            prompt_label: TextAnchor {
                x: padding,
                baseline: prompt_start_y - s(PROMPT_LABEL_RAISE),
                size: s(PROMPT_LABEL_FONT_SIZE),
            },
            badge,
            border,
        }
    }

    /// Anchor of the i-th prompt line.
    pub fn prompt_line(&self, index: usize) -> TextAnchor {
        TextAnchor {
            x: self.padding,
            baseline: self.prompt_start_y
                + index as f32 * self.line_height
                + (PROMPT_BASELINE_OFFSET * self.scale) as f32,
            size: self.font_px,
        }
    }

    /// Whether rendering this layout requires a font at all.
    #[inline]
    pub fn needs_font(&self) -> bool {
        self.overlay
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::model::constants::{CARD_HEIGHT, CARD_WIDTH, MAX_PROMPT_LINES};
    use crate::model::{Model, StyleBuilder};
    use super::Layout;

    fn layout(style: crate::model::StyleParameters) -> Layout {
        Layout::compute(&style, 1, MAX_PROMPT_LINES)
    }

    #[test]
    fn margin_scales_monotonically_from_zero() {
        let margins: Vec<u32> = [0u8, 25, 50, 100].iter()
            .map(|&pct| Layout::safe_zone_margin(CARD_WIDTH, true, pct))
            .collect();
        assert_that!(margins[0]).is_equal_to(0);
        assert!(margins.windows(2).all(|w| w[0] <= w[1]));
        // Disabled safe zone always means zero margin.
        assert_that!(Layout::safe_zone_margin(CARD_WIDTH, false, 100)).is_equal_to(0);
    }

    #[test]
    fn reference_margin_at_quarter_scale() {
        // 1080 * 25 / 400 = 67.5, rounds half up to 68.
        assert_that!(Layout::safe_zone_margin(CARD_WIDTH, true, 25)).is_equal_to(68);
    }

    #[test]
    fn out_of_range_scale_from_the_wire_is_clamped() {
        // Deserialization bypasses the builder's validation, so an
        // oversized scale must not underflow the main rectangle.
        let style: crate::model::StyleParameters = serde_json::from_value(
            serde_json::json!({"safeZoneScale": 255})).unwrap();
        let layout = Layout::compute(&style, 1, MAX_PROMPT_LINES);
        assert_that!(layout.margin).is_equal_to(270);  // same as 100%
        assert!(layout.main.width > 0 && layout.main.height > 0);
    }

    #[test]
    fn short_prompt_stays_on_one_line() {
        let style = StyleBuilder::new()
            .prompt_text("Hello World")
            .build().unwrap();
        let layout = layout(style);
        assert_that!(layout.margin).is_equal_to(68);
        assert_that!(layout.lines).is_equal_to(vec!["Hello World".to_string()]);
    }

    #[test]
    fn long_prompt_is_capped_and_does_not_panic() {
        let style = StyleBuilder::new()
            .prompt_text("word ".repeat(500))
            .build().unwrap();
        let layout = layout(style);
        assert_that!(layout.lines).has_length(MAX_PROMPT_LINES);
        // The block may extend above the canvas, but geometry stays finite.
        assert!(layout.prompt_start_y.is_finite());
    }

    #[test]
    fn model_none_suppresses_badge() {
        let style = StyleBuilder::new().model(Model::None).build().unwrap();
        assert_that!(layout(style).badge).is_none();
    }

    #[test]
    fn hiding_text_keeps_the_badge() {
        let style = StyleBuilder::new()
            .prompt_text("hidden")
            .show_text(false)
            .build().unwrap();
        let layout = layout(style);
        assert!(!layout.show_prompt_lines);
        assert_that!(layout.badge).is_some();
    }

    #[test]
    fn original_only_suppresses_the_whole_overlay() {
        let style = StyleBuilder::new()
            .show_original_only(true)
            .build().unwrap();
        let layout = layout(style);
        assert!(!layout.overlay);
        assert_that!(layout.gradient_peak).is_equal_to(0.0);
        assert_that!(layout.badge).is_none();
        assert_that!(layout.border).is_none();
        assert!(!layout.needs_font());
        // Full bleed: the safe zone is ignored even though it's enabled.
        assert_that!(layout.margin).is_equal_to(0);
        assert_that!(layout.main.width).is_equal_to(layout.width);
    }

    #[test]
    fn border_follows_its_toggle() {
        let with = layout(StyleBuilder::new().show_border(true).build().unwrap());
        let without = layout(StyleBuilder::new().show_border(false).build().unwrap());
        assert_that!(with.border).is_some();
        assert_that!(without.border).is_none();
    }

    #[test]
    fn dimensions_scale_with_export_scale() {
        let style = StyleBuilder::new().prompt_text("hi").build().unwrap();
        let small = Layout::compute(&style, 1, MAX_PROMPT_LINES);
        let big = Layout::compute(&style, 4, MAX_PROMPT_LINES);
        assert_that!(big.width).is_equal_to(4 * CARD_WIDTH);
        assert_that!(big.height).is_equal_to(4 * CARD_HEIGHT);
        // 67.5 rounds to 68 at 1x; at 4x the margin is exactly 270.
        assert_that!(small.margin).is_equal_to(68);
        assert_that!(big.margin).is_equal_to(270);
        // Same character budget, so the same line breaks at any scale.
        assert_that!(big.lines).is_equal_to(&small.lines);
    }

    #[test]
    fn prompt_block_is_bottom_anchored() {
        let style = StyleBuilder::new().prompt_text("one line").build().unwrap();
        let layout = layout(style);
        let last = layout.prompt_line(layout.lines.len() - 1);
        // The block's bottom sits `padding` + label-block above the bottom edge.
        assert!(last.baseline < CARD_HEIGHT as f32 - layout.padding);
    }
}
