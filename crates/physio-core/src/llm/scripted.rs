//! Canned-response client for tests and offline runs.

use std::sync::Mutex;

use async_trait::async_trait;

use super::trait_def::{LlmError, TextGenerationClient};

/// Returns a fixed reply (or a fixed error) and records every prompt it saw.
#[derive(Debug)]
pub struct ScriptedClient {
    reply: Result<String, LlmError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: LlmError) -> Self {
        Self {
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        match self.prompts.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl TextGenerationClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        match self.prompts.lock() {
            Ok(mut guard) => guard.push(prompt.to_string()),
            Err(poisoned) => poisoned.into_inner().push(prompt.to_string()),
        }
        self.reply.clone()
    }
}
