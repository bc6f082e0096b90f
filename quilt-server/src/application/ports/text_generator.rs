use async_trait::async_trait;
use thiserror::Error;

/// External text-generation capability: prompt in, text out
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Provider name for logs
    fn name(&self) -> &str {
        "TextGenerator"
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Text generation is not configured")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Provider returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("Provider call timed out")]
    Timeout,
}
