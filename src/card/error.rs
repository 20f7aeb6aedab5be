//! Card rendering error.

use std::error::Error;

use thiserror::Error as DeriveError;


/// Error that may occur while building a card.
///
/// All of these are fatal for the request: the engine never returns a
/// partially rendered card. (Palette extraction degrades instead of
/// failing, so it has no variant here.)
#[derive(Debug, DeriveError)]
pub enum CardError {
    /// The source image buffer was empty.
    #[error("empty source image buffer")]
    EmptyInput,
    /// The source image could not be decoded.
    #[error("cannot decode source image")]
    Decode(#[source] image::ImageError),
    /// The font for the text layer could not be loaded.
    #[error("cannot load font `{name}`")]
    Font {
        name: String,
        #[source] source: Box<dyn Error + Send + Sync>,
    },
    /// The final image could not be encoded.
    #[error("failed to encode the final image")]
    Encode(#[source] image::ImageError),
}
