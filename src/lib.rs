//!
//! promptcard -- styled prompt-card rendering
//!
//! Takes a source photo and a set of style parameters, and flattens
//! a multi-layer card (blurred letterbox background, cover-fitted main image,
//! bottom-up gradient, wrapped prompt text with branding, themed border)
//! into a fixed-size PNG. Also ships the color palette extractor used for
//! theme suggestions and a TTL session store for conversational frontends.
//!

mod card;
mod model;
mod palette;
mod resources;
mod session;
pub mod text;
mod util;

pub use card::*;
pub use model::*;
pub use palette::*;
pub use resources::*;
pub use session::*;
pub use util::cache::*;
