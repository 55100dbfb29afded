//! Connection settings and timeouts for the chat-completions client.

use std::fmt;
use std::time::Duration;

/// Connection settings for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct LlmConfig {
    /// API root, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Bearer token. No `Authorization` header is sent when `None`.
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    /// Time allowed to establish the connection.
    pub connect_timeout: Duration,
    /// Time allowed between reads of the response.
    pub read_timeout: Duration,
    /// Time allowed to send the request body.
    pub write_timeout: Duration,
}

impl LlmConfig {
    pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
    pub const DEFAULT_MODEL: &str = "deepseek-chat";
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 60;
    pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 30;

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Upper bound on one whole request: connect, write and read phases.
    ///
    /// reqwest has no separate write timeout, so the write budget is folded
    /// into the overall deadline.
    pub fn request_timeout(&self) -> Duration {
        self.connect_timeout + self.write_timeout + self.read_timeout
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: Self::DEFAULT_MODEL.to_string(),
            temperature: Self::DEFAULT_TEMPERATURE,
            connect_timeout: Duration::from_secs(Self::DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(Self::DEFAULT_READ_TIMEOUT_SECS),
            write_timeout: Duration::from_secs(Self::DEFAULT_WRITE_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LlmConfig::default();
        assert_eq!(cfg.base_url, "https://api.deepseek.com/v1");
        assert_eq!(cfg.model, "deepseek-chat");
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.connect_timeout, Duration::from_secs(30));
        assert_eq!(cfg.read_timeout, Duration::from_secs(60));
        assert_eq!(cfg.write_timeout, Duration::from_secs(30));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn endpoint_joins_path() {
        assert_eq!(
            LlmConfig::new("http://localhost:9000/v1").endpoint(),
            "http://localhost:9000/v1/chat/completions"
        );
        assert_eq!(
            LlmConfig::new("http://localhost:9000/v1/").endpoint(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = LlmConfig::default().with_api_key("sk-secret");
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
