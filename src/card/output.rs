//! Defines the output of a card render.

use std::ops::Deref;

use image::ImageFormat;


/// Output of a card render: an encoded PNG plus its dimensions.
#[derive(Clone, Debug)]
#[must_use = "unused card output which must be used"]
pub struct CardOutput {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl CardOutput {
    #[inline]
    pub(super) fn new(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        CardOutput { width, height, bytes }
    }
}

impl CardOutput {
    /// Image format of the output. Always PNG.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    /// Final raster dimensions.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw bytes of the output.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Convert the output into a vector of bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The MIME type of the output.
    #[inline]
    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

impl Deref for CardOutput {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes()
    }
}

impl From<CardOutput> for Vec<u8> {
    fn from(output: CardOutput) -> Vec<u8> {
        output.into_bytes()
    }
}
