//! Utility modules.

pub mod cache;
