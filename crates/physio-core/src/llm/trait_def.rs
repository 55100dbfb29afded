//! The `TextGenerationClient` trait and its error type.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Failures surfaced by a text-generation backend.
///
/// The plan pipeline never propagates these; it records them as the
/// reason for falling back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response contained no message content")]
    MissingContent,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// A single-shot text generation backend.
///
/// Implementations send one prompt and return the generated text. They
/// must not retry; the pipeline makes exactly one attempt per request.
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    /// Short backend name for logs (e.g. "chat-completions").
    fn name(&self) -> &str;

    /// Send `prompt` and return the raw generated text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl TextGenerationClient for Arc<dyn TextGenerationClient> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).complete(prompt).await
    }
}

// If this compiles, the trait can be used as `dyn TextGenerationClient`.
const _: () = {
    fn _assert_object_safe(_: &dyn TextGenerationClient) {}
};
