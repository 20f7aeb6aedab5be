//! Module implementing the compositing of cards.

mod draw;
mod engine;
mod error;
pub mod layout;
mod output;
mod task;

pub use self::engine::{Builder as EngineBuilder, BuildError as EngineBuildError,
                       Config as EngineConfig, Engine};
pub use self::error::CardError;
pub use self::output::CardOutput;
