//! Core types used throughout the crate.

pub mod config;
pub mod prompt;

// Re-export commonly used types
pub use config::*;
pub use prompt::*;
