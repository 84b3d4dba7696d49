//! Provider implementations for generative-language services.

pub mod gemini;

// Re-export commonly used provider types
pub use gemini::GeminiProvider;
