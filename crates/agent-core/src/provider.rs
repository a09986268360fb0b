//! LLM Provider Strategy Pattern
//!
//! Common interface for language-model backends. The agent only uses the
//! model to pick a capability (with its arguments) and to phrase the final
//! reply; every decision about what is allowed is made by deterministic code.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = OllamaProvider::from_env();
//! let completion = provider.complete(&messages, &GenerationOptions::default()).await?;
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::message::Message;

/// Sampling options for a single completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "llama3.2")
    pub model: String,

    #[serde(default = "default_temperature")]
    /// Sampling temperature (0.0 - 1.0)
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    /// Maximum tokens to generate
    pub max_tokens: u32,

    #[serde(default = "default_top_p")]
    /// Nucleus sampling threshold
    pub top_p: f32,

    #[serde(default)]
    /// Stop sequences
    pub stop_sequences: Vec<String>,
}

const fn default_temperature() -> f32 {
    0.2
}
const fn default_max_tokens() -> u32 {
    1024
}
const fn default_top_p() -> f32 {
    0.9
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "llama3.2".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            stop_sequences: Vec::new(),
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text
    pub content: String,

    /// Model used
    pub model: String,

    /// Token usage, when the backend reports it
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens generated
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Prompt and completion tokens combined
    pub const fn total(self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// Information about a model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// Strategy trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Whether the backend is reachable and configured
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(&self, messages: &[Message], options: &GenerationOptions)
        -> Result<Completion>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}

/// Provider that replays canned responses in order.
///
/// Used by tests and offline demos; records every prompt it receives.
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
    received: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Number of `complete` calls made so far
    pub fn calls(&self) -> usize {
        self.received.lock().map_or(0, |r| r.len())
    }

    /// Messages passed to the n-th `complete` call
    pub fn prompt(&self, call: usize) -> Option<Vec<Message>> {
        self.received.lock().ok()?.get(call).cloned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.received
            .lock()
            .map_err(|_| AgentError::Provider("scripted provider lock poisoned".into()))?
            .push(messages.to_vec());

        let content = self
            .responses
            .lock()
            .map_err(|_| AgentError::Provider("scripted provider lock poisoned".into()))?
            .pop_front()
            .ok_or_else(|| AgentError::ProviderUnavailable("script exhausted".into()))?;

        Ok(Completion {
            content,
            model: options.model.clone(),
            usage: None,
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(vec![ModelInfo {
            id: "scripted".into(),
            name: "scripted".into(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.max_tokens, 1024);
        assert_eq!(opts.model, "llama3.2");
    }

    #[tokio::test]
    async fn test_scripted_provider_replays_in_order() {
        let provider = ScriptedProvider::new(["first", "second"]);
        let opts = GenerationOptions::default();
        let msgs = [Message::user("hi")];

        assert_eq!(provider.complete(&msgs, &opts).await.unwrap().content, "first");
        assert_eq!(provider.complete(&msgs, &opts).await.unwrap().content, "second");
        assert!(provider.complete(&msgs, &opts).await.is_err());
        assert_eq!(provider.calls(), 3);
    }
}
