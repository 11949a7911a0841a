//! Configuration module for Markdown Express
//!
//! Preferences and the working document live in a string-keyed store that is
//! persisted as JSON in the platform configuration directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
