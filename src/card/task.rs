//! Module implementing the actual card rendering task.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageDecoder, ImageError, ImageFormat, ImageReader,
            Rgba, RgbaImage};
use log::{debug, trace};

use crate::model::constants::{BACKGROUND_BRIGHTNESS, BACKGROUND_SATURATION,
                              BRANDING_FONT_FAMILY, PROMPT_LABEL,
                              TEXT_SHADOW_ALPHA, TEXT_SHADOW_OFFSET,
                              WORDMARK_LEFT, WORDMARK_RIGHT};
use crate::model::{HAlign, StyleParameters};
use crate::resources::{Font, Loader};
use crate::text::{self, Style};
use super::draw;
use super::engine::{Config, Inner};
use super::error::CardError;
use super::layout::Layout;
use super::output::CardOutput;


const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);


/// Represents a single card rendering task.
pub(super) struct CardTask<'e, Fl: Loader<Item = Font>> {
    image: &'e [u8],
    style: &'e StyleParameters,
    engine: Arc<Inner<Fl>>,
}

impl<'e, Fl: Loader<Item = Font>> CardTask<'e, Fl> {
    #[inline]
    pub fn new(image: &'e [u8], style: &'e StyleParameters,
               engine: Arc<Inner<Fl>>) -> Self {
        CardTask { image, style, engine }
    }
}

// Performing the task.
impl<'e, Fl: Loader<Item = Font>> CardTask<'e, Fl> {
    /// Perform the complete render: decode, composite the layers
    /// bottom-to-top, and encode the result as PNG.
    pub fn perform(self) -> Result<CardOutput, CardError> {
        if self.image.is_empty() {
            return Err(CardError::EmptyInput);
        }

        let config = *self.engine.config.read();
        let source = self.decode_source()?;
        let layout = Layout::compute(self.style, config.export_scale, config.max_lines);
        debug!("Rendering a {}x{} card ({} prompt line(s)) from a {}x{} source image",
            layout.width, layout.height, layout.lines.len(),
            source.width(), source.height());

        let mut canvas = self.render_background(&source, &layout, &config);
        self.render_main_image(&mut canvas, &source, &layout);
        draw::vertical_gradient(&mut canvas, layout.main, layout.gradient_peak);
        if layout.needs_font() {
            // Branding is always set in a fixed sans face; the chosen
            // family only styles the prompt lines themselves.
            let branding = self.load_font(BRANDING_FONT_FAMILY.resource_name())?;
            let prompt = if layout.show_prompt_lines && !layout.lines.is_empty() {
                self.load_font(self.style.font_family.resource_name())?
            } else {
                branding.clone()
            };
            self.render_text(&mut canvas, &layout, &branding, &prompt);
        }
        if let Some(border) = layout.border {
            draw::stroke_rounded_rect(&mut canvas, border.rect,
                border.radius, border.stroke, self.style.theme_color.to_rgba(0xff));
        }

        self.encode(canvas)
    }

    /// Decode the source image, honoring its EXIF orientation.
    fn decode_source(&self) -> Result<DynamicImage, CardError> {
        let mut decoder = ImageReader::new(Cursor::new(self.image))
            .with_guessed_format()
            .map_err(|e| CardError::Decode(ImageError::IoError(e)))?
            .into_decoder()
            .map_err(CardError::Decode)?;
        let orientation = decoder.orientation().map_err(CardError::Decode)?;
        let mut image = DynamicImage::from_decoder(decoder).map_err(CardError::Decode)?;
        image.apply_orientation(orientation);
        Ok(image)
    }

    fn load_font(&self, name: &str) -> Result<Arc<Font>, CardError> {
        self.engine.fonts.load(name).map_err(|e| CardError::Font {
            name: name.to_owned(),
            source: Box::new(e),
        })
    }
}

// Layer rendering.
impl<'e, Fl: Loader<Item = Font>> CardTask<'e, Fl> {
    /// Bottom layer: the letterbox visible around the safe zone margin.
    ///
    /// Either a blurred, darkened, slightly saturated copy of the source
    /// stretched to cover the whole canvas, or plain black.
    fn render_background(&self, source: &DynamicImage,
                         layout: &Layout, config: &Config) -> RgbaImage {
        if layout.margin == 0 {
            // The main image covers every pixel anyway.
            return draw::solid(layout.width, layout.height, BLACK);
        }
        if !self.style.blur_background {
            return draw::solid(layout.width, layout.height, BLACK);
        }

        trace!("Blurring the background (sigma={})",
            config.blur_sigma * layout.scale as f32);
        let cover = draw::cover(source, layout.width, layout.height);
        let mut background = draw::blur(cover, config.blur_sigma * layout.scale as f32);
        draw::modulate(&mut background, BACKGROUND_BRIGHTNESS, BACKGROUND_SATURATION);
        background
    }

    /// The source image, cover-fitted into the safe zone rectangle.
    fn render_main_image(&self, canvas: &mut RgbaImage,
                         source: &DynamicImage, layout: &Layout) {
        let main = draw::cover(source, layout.main.width, layout.main.height);
        draw::overlay(canvas, &main, layout.main.x, layout.main.y);
    }

    /// Top layer: wordmark, model badge, "PROMPT" label and prompt lines.
    fn render_text(&self, canvas: &mut RgbaImage, layout: &Layout,
                   branding: &Font, prompt: &Font) {
        let theme = self.style.theme_color.to_rgba(0xff);

        // Wordmark, right-aligned as a whole: the trailing segment hangs
        // off the anchor and the leading one is pushed left of it.
        let right_width = text::line_width(
            branding, WORDMARK_RIGHT, layout.wordmark.size);
        text::draw_line(canvas, WORDMARK_RIGHT,
            layout.wordmark.x, layout.wordmark.baseline, HAlign::Right,
            Style::new(branding, layout.wordmark.size, theme));
        text::draw_line(canvas, WORDMARK_LEFT,
            layout.wordmark.x - right_width, layout.wordmark.baseline, HAlign::Right,
            Style::new(branding, layout.wordmark.size, WHITE));

        if let Some(ref badge) = layout.badge {
            draw::fill_rounded_rect(canvas, badge.rect, badge.corner_radius, theme);
            text::draw_line(canvas, badge.label,
                badge.text.x, badge.text.baseline, HAlign::Left,
                Style::new(branding, badge.text.size, BLACK));
        }

        text::draw_line(canvas, PROMPT_LABEL,
            layout.prompt_label.x, layout.prompt_label.baseline, HAlign::Left,
            Style::new(branding, layout.prompt_label.size, WHITE));

        if layout.show_prompt_lines {
            let style = Style::new(prompt, layout.font_px, WHITE);
            let shadow_offset = TEXT_SHADOW_OFFSET * layout.scale as f32;
            for (i, line) in layout.lines.iter().enumerate() {
                let anchor = layout.prompt_line(i);
                text::draw_line_with_shadow(canvas, line,
                    anchor.x, anchor.baseline, HAlign::Left,
                    style, shadow_offset, TEXT_SHADOW_ALPHA);
            }
        }
    }

    fn encode(&self, canvas: RgbaImage) -> Result<CardOutput, CardError> {
        let (width, height) = canvas.dimensions();
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(CardError::Encode)?;
        debug!("Encoded the final card as {} bytes of PNG", bytes.len());
        Ok(CardOutput::new(width, height, bytes))
    }
}
