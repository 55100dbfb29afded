//! Text-generation client interface and implementations.
//!
//! The pipeline only needs "prompt in, text or failure out". The
//! [`TextGenerationClient`] trait captures exactly that, so the service can
//! hold a `Box<dyn TextGenerationClient>` or `Arc<dyn TextGenerationClient>`
//! without knowing which backend is behind it.
//!
//! ```text
//! PlanService --complete(prompt)--> &dyn TextGenerationClient
//!                                       |
//!                  +--------------------+------------------+
//!                  |                                       |
//!        ChatCompletionsClient                      ScriptedClient
//!   (POST {base_url}/chat/completions)        (fixed reply, for tests)
//! ```

pub mod chat;
pub mod config;
pub mod scripted;
pub mod trait_def;

pub use chat::ChatCompletionsClient;
pub use config::LlmConfig;
pub use scripted::ScriptedClient;
pub use trait_def::{LlmError, TextGenerationClient};
