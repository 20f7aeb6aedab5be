//! Module with the raster painting primitives of the compositor.
//!
//! Everything here is deterministic: pure pixel math, no randomness and
//! no clock-dependent behavior.

use image::{DynamicImage, Pixel, Rgba, RgbaImage};
use image::imageops::{self, FilterType};

use crate::model::constants::{GRADIENT_MID_FRACTION, GRADIENT_MID_STOP};
use super::layout::{Rect, RectF};


/// Resize an image to cover the given dimensions, center-cropping
/// whatever overflows ("cover" fit).
pub fn cover(image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    image.resize_to_fill(width, height, FilterType::Lanczos3).to_rgba8()
}

/// A solid-color canvas.
pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Gaussian-blur an image in place.
pub fn blur(image: RgbaImage, sigma: f32) -> RgbaImage {
    imageops::blur(&image, sigma)
}

/// Scale brightness and saturation of every pixel.
///
/// Saturation pivots each channel around the pixel's luma, matching the
/// preview's CSS filter treatment closely enough.
pub fn modulate(image: &mut RgbaImage, brightness: f32, saturation: f32) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        let adjust = |c: u8| -> u8 {
            let saturated = luma + (c as f32 - luma) * saturation;
            (saturated * brightness).clamp(0.0, 255.0) as u8
        };
        *pixel = Rgba([adjust(r), adjust(g), adjust(b), a]);
    }
}

/// Paste `top` onto `bottom` with its top-left corner at (x, y).
pub fn overlay(bottom: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    imageops::overlay(bottom, top, x as i64, y as i64);
}

/// Darken `rect` with a vertical gradient: `peak` opacity black at the
/// bottom edge, fading to fully transparent at the top, with a mid stop
/// holding a fraction of the peak for a non-linear falloff.
pub fn vertical_gradient(image: &mut RgbaImage, rect: Rect, peak: f32) {
    if peak <= 0.0 || rect.height == 0 {
        return;
    }
    let (width, height) = image.dimensions();
    let bottom = rect.bottom().min(height);
    let right = rect.right().min(width);

    for y in rect.y..bottom {
        // Position within the rect, measured up from the bottom edge.
        let t = (bottom - 1 - y) as f32 / rect.height as f32;
        let opacity = peak * falloff(t);
        if opacity <= 0.0 {
            continue;
        }
        let keep = 1.0 - opacity;
        for x in rect.x..right {
            let pixel = image.get_pixel_mut(x, y);
            let [r, g, b, a] = pixel.0;
            *pixel = Rgba([
                (r as f32 * keep) as u8,
                (g as f32 * keep) as u8,
                (b as f32 * keep) as u8,
                a,
            ]);
        }
    }
}

/// Gradient opacity factor at height fraction `t` (0 = bottom, 1 = top).
fn falloff(t: f32) -> f32 {
    if t <= GRADIENT_MID_STOP {
        // Between the full-opacity bottom stop and the mid stop.
        1.0 - (t / GRADIENT_MID_STOP) * (1.0 - GRADIENT_MID_FRACTION)
    } else {
        // Between the mid stop and the transparent top.
        GRADIENT_MID_FRACTION * (1.0 - t) / (1.0 - GRADIENT_MID_STOP)
    }
}

/// Fill a rounded rectangle with a solid color.
pub fn fill_rounded_rect(image: &mut RgbaImage, rect: RectF, radius: f32, color: Rgba<u8>) {
    let (width, height) = image.dimensions();
    let x0 = rect.x.floor().max(0.0) as u32;
    let y0 = rect.y.floor().max(0.0) as u32;
    let x1 = (rect.x + rect.width).ceil().min(width as f32) as u32;
    let y1 = (rect.y + rect.height).ceil().min(height as f32) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            let d = rounded_rect_distance(x as f32 + 0.5, y as f32 + 0.5, rect, radius);
            let coverage = (0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let mut c = color;
                c[3] = (c[3] as f32 * coverage) as u8;
                image.get_pixel_mut(x, y).blend(&c);
            }
        }
    }
}

/// Stroke the outline of a rounded rectangle.
pub fn stroke_rounded_rect(image: &mut RgbaImage, rect: RectF,
                           radius: f32, stroke: f32, color: Rgba<u8>) {
    let (width, height) = image.dimensions();
    let reach = stroke / 2.0 + 1.0;
    let x0 = (rect.x - reach).floor().max(0.0) as u32;
    let y0 = (rect.y - reach).floor().max(0.0) as u32;
    let x1 = (rect.x + rect.width + reach).ceil().min(width as f32) as u32;
    let y1 = (rect.y + rect.height + reach).ceil().min(height as f32) as u32;

    for y in y0..y1 {
        let py = y as f32 + 0.5;
        let edge_y = (py - rect.y).min(rect.y + rect.height - py);
        for x in x0..x1 {
            let px = x as f32 + 0.5;
            // Everything far from every edge (and outside the corner
            // sweeps) can be skipped without computing the distance.
            let edge_x = (px - rect.x).min(rect.x + rect.width - px);
            let near_edge = edge_x <= reach + 1.0 || edge_y <= reach + 1.0;
            let near_corner = edge_x <= radius + reach && edge_y <= radius + reach;
            if !(near_edge || near_corner) {
                continue;
            }

            let d = rounded_rect_distance(px, py, rect, radius).abs();
            let coverage = (stroke / 2.0 + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let mut c = color;
                c[3] = (c[3] as f32 * coverage) as u8;
                image.get_pixel_mut(x, y).blend(&c);
            }
        }
    }
}

/// Signed distance from a point to the boundary of a rounded rectangle
/// (negative inside).
fn rounded_rect_distance(px: f32, py: f32, rect: RectF, radius: f32) -> f32 {
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let radius = radius.min(half_w).min(half_h);
    let cx = rect.x + half_w;
    let cy = rect.y + half_h;

    let qx = (px - cx).abs() - (half_w - radius);
    let qy = (py - cy).abs() - (half_h - radius);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}
