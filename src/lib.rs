//! Send one context-augmented prompt to Gemini and print the answer.
//!
//! The library holds each step of the run (configuration, context loading,
//! prompt composition, the provider call and output) so the binary in
//! `main.rs` only wires them together.

pub mod context;
pub mod error;
pub mod provider;
pub mod providers;
pub mod response;
pub mod runner;
pub mod types;

// Re-export core types for easy usage
pub use context::ContextDocument;
pub use error::Error;
pub use provider::LLMProvider;
pub use providers::*;
pub use response::Response;
pub use runner::run;
pub use types::*;
