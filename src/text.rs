//! Module responsible for laying out and rendering text.
//!
//! Wrapping is a character-count heuristic, not true text measurement:
//! both renderers derive the per-line character budget from the same
//! `CHAR_WIDTH_RATIO`, which keeps their line breaks consistent.

use image::{Pixel, Rgba, RgbaImage};
use log::trace;
use rusttype::{point, Font, Scale};
use unicode_normalization::UnicodeNormalization;

use crate::model::constants::{CHAR_WIDTH_RATIO, TEXT_BLOCK_WIDTH_RATIO};
use crate::model::HAlign;


/// Unicode blocks stripped from prompt text before rendering.
///
/// The glyph renderer has no color-emoji support, so emoji and dingbats
/// would come out as tofu boxes.
const STRIPPED_BLOCKS: [(u32, u32); 5] = [
    (0x1F300, 0x1F5FF),  // symbols & pictographs
    (0x1F600, 0x1F64F),  // emoticons
    (0x1F680, 0x1F6FF),  // transport & map
    (0x2600, 0x26FF),    // misc symbols
    (0x2700, 0x27BF),    // dingbats
];


/// Clean prompt text for rendering: NFC-normalize, then drop emoji
/// and non-whitespace control characters.
pub fn clean(text: &str) -> String {
    text.nfc()
        .filter(|&ch| {
            let cp = ch as u32;
            if STRIPPED_BLOCKS.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp)) {
                return false;
            }
            ch.is_whitespace() || !ch.is_control()
        })
        .collect()
}

/// How many characters fit on a prompt line of given pixel width.
pub fn max_chars_per_line(available_width: f32, font_size: f32) -> usize {
    let chars = (available_width * TEXT_BLOCK_WIDTH_RATIO
                 / (font_size * CHAR_WIDTH_RATIO)).floor() as usize;
    chars.max(1)
}

/// Greedily wrap `text` into lines of at most `max_chars` characters.
///
/// Splits on whitespace only; a single word longer than `max_chars` is
/// kept whole on its own line. The result is silently truncated to
/// `max_lines` -- overflow never fails the layout.
pub fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        trace!("Truncating wrapped text from {} to {} lines", lines.len(), max_lines);
        lines.truncate(max_lines);
    }
    lines
}


/// Text style: font, pixel size and fill color.
#[derive(Clone, Copy)]
pub struct Style<'f> {
    pub font: &'f Font<'static>,
    pub size: f32,
    pub color: Rgba<u8>,
}

impl<'f> Style<'f> {
    #[inline]
    pub fn new(font: &'f Font<'static>, size: f32, color: Rgba<u8>) -> Self {
        Style { font, size, color }
    }
}

/// Width of a laid-out line of text, in pixels.
pub fn line_width(font: &Font, s: &str, size: f32) -> f32 {
    let scale = Scale::uniform(size);
    font.layout(s, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Render a single line of text onto the image.
///
/// `x` is the anchor according to `align` (left edge, center, or right
/// edge of the line); `baseline` is the glyph baseline in image space.
pub fn draw_line(img: &mut RgbaImage, s: &str,
                 x: f32, baseline: f32, align: HAlign, style: Style) {
    if s.is_empty() {
        return;
    }
    trace!("draw_line({:?}, x={}, baseline={}, align={:?}, size={})",
        s, x, baseline, align, style.size);

    let start_x = match align {
        HAlign::Left => x,
        HAlign::Center => x - line_width(style.font, s, style.size) / 2.0,
        HAlign::Right => x - line_width(style.font, s, style.size),
    };

    let (width, height) = img.dimensions();
    let scale = Scale::uniform(style.size);
    for glyph in style.font.layout(s, scale, point(start_x, baseline)) {
        if let Some(bbox) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = bbox.min.x + gx as i32;
                let py = bbox.min.y + gy as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = (v * style.color[3] as f32) as u8;
                let Rgba([r, g, b, _]) = style.color;
                img.get_pixel_mut(px as u32, py as u32)
                    .blend(&Rgba([r, g, b, alpha]));
            });
        }
    }
}

/// Render a line with a four-way offset shadow underneath it,
/// for legibility over arbitrary image content.
pub fn draw_line_with_shadow(img: &mut RgbaImage, s: &str,
                             x: f32, baseline: f32, align: HAlign,
                             style: Style, shadow_offset: f32, shadow_alpha: f32) {
    let shadow = Style {
        color: Rgba([0, 0, 0, (shadow_alpha * 255.0) as u8]),
        ..style
    };
    for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        draw_line(img, s,
            x + dx * shadow_offset, baseline + dy * shadow_offset, align, shadow);
    }
    draw_line(img, s, x, baseline, align, style);
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use super::{clean, max_chars_per_line, wrap};

    #[test]
    fn wrap_simple() {
        assert_that!(wrap("Hello World", 38, 15))
            .is_equal_to(vec!["Hello World".to_string()]);
        assert_that!(wrap("one two three four", 9, 15))
            .is_equal_to(vec!["one two".to_string(),
                              "three".to_string(),
                              "four".to_string()]);
    }

    #[test]
    fn wrap_empty_text_yields_no_lines() {
        assert_that!(wrap("", 40, 15)).is_empty();
        assert_that!(wrap("   \n\t ", 40, 15)).is_empty();
    }

    #[test]
    fn wrap_keeps_overlong_words_whole() {
        let lines = wrap("a Pneumonoultramicroscopicsilicovolcanoconiosis b", 10, 15);
        assert_that!(lines).is_equal_to(vec![
            "a".to_string(),
            "Pneumonoultramicroscopicsilicovolcanoconiosis".to_string(),
            "b".to_string(),
        ]);
    }

    #[test]
    fn wrap_truncates_to_max_lines() {
        let text = "word ".repeat(500);
        let lines = wrap(&text, 20, 15);
        assert_that!(lines).has_length(15);
    }

    #[test]
    fn wrap_is_idempotent() {
        let text = "the quick brown fox jumps over the lazy dog \
                    and keeps on jumping until it gets tired";
        let once = wrap(text, 24, 15);
        let rejoined = once.join(" ");
        assert_that!(wrap(&rejoined, 24, 15)).is_equal_to(&once);
    }

    #[test]
    fn clean_strips_emoji_but_keeps_text() {
        assert_that!(clean("neon 🌆 city 🚀")).is_equal_to("neon  city ".to_string());
        assert_that!(clean("çok güzel")).is_equal_to("çok güzel".to_string());
        assert_that!(clean("tab\tand\nnewline")).is_equal_to("tab\tand\nnewline".to_string());
    }

    #[test]
    fn max_chars_matches_reference_numbers() {
        // 1080px canvas, 25% safe zone (68px margin), 36pt font.
        let available = (1080 - 2 * 68) as f32;
        assert_that!(max_chars_per_line(available, 36.0)).is_equal_to(38);
        // Never less than one character per line.
        assert_that!(max_chars_per_line(1.0, 72.0)).is_equal_to(1);
    }
}
