//! OpenAI-compatible chat-completions client.
//!
//! Sends the prompt as a single user message and returns the content of
//! the first choice. One attempt per call; timeouts come from
//! [`LlmConfig`].

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::trait_def::{LlmError, TextGenerationClient};

/// Longest upstream error body kept in an [`LlmError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 2_000;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ChatCompletionsClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LlmError::Build(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| LlmError::Build(format!("invalid API key header: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl TextGenerationClient for ChatCompletionsClient {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            stream: false,
        };

        let endpoint = self.config.endpoint();
        tracing::debug!(%endpoint, model = %self.config.model, "sending chat completion request");

        let response = self
            .client
            .post(&endpoint)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let text = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::MissingContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = ChatRequest {
            model: "deepseek-chat",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.5,
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "deepseek-chat");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn response_with_null_content() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }

    #[test]
    fn bearer_header_only_with_key() {
        let anonymous = ChatCompletionsClient::new(LlmConfig::default()).unwrap();
        assert!(anonymous.headers().unwrap().get(AUTHORIZATION).is_none());

        let keyed =
            ChatCompletionsClient::new(LlmConfig::default().with_api_key("sk-test")).unwrap();
        let headers = keyed.headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
    }

    #[test]
    fn invalid_key_is_rejected() {
        let client =
            ChatCompletionsClient::new(LlmConfig::default().with_api_key("bad\nkey")).unwrap();
        assert!(matches!(client.headers(), Err(LlmError::Build(_))));
    }
}
