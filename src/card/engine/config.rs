//! Module with rendering engine configuration.

use crate::model::constants::{BACKGROUND_BLUR_SIGMA, DEFAULT_EXPORT_SCALE,
                              MAX_PROMPT_LINES};


/// Structure holding configuration for the `Engine`.
///
/// This is shared with `CardTask`s.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Multiplier applied to the nominal 1080x1920 canvas.
    /// The Telegram delivery path renders at 4.
    pub export_scale: u32,
    /// Gaussian blur sigma of the letterbox background, at 1x scale.
    pub blur_sigma: f32,
    /// Cap on the number of prompt lines rendered.
    pub max_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            export_scale: DEFAULT_EXPORT_SCALE,
            blur_sigma: BACKGROUND_BLUR_SIGMA,
            max_lines: MAX_PROMPT_LINES,
        }
    }
}
