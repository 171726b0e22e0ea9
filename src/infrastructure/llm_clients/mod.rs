pub mod gemini;

use crate::domain::error::Result;
use async_trait::async_trait;

pub use gemini::GeminiClient;

/// Outbound text-generation capability: one prompt in, generated text out.
/// The credential is supplied by the caller on every request.
#[async_trait]
pub trait TextGenClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String>;
}
