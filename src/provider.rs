use crate::{Error, Prompt, Response};

/// A trait for services that can answer a single prompt.
/// Implementations make exactly one round trip per call: no retries, no streaming.
#[async_trait::async_trait]
pub trait LLMProvider: Send + Sync + 'static {
    /// Generate a response for `prompt`.
    async fn generate(&self, prompt: &Prompt) -> Result<Response, Error>;
}
