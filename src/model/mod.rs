//! Module defining the data model of a card.

pub mod constants;
mod de;
mod types;

pub use self::types::*;
