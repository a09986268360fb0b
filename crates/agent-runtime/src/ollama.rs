//! Ollama LLM Provider
//!
//! Implementation of `LlmProvider` for local Ollama inference.

use std::error::Error as StdError;
use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, GenerationOptions, LlmProvider, ModelInfo, TokenUsage},
};
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage, ChatMessageResponse, MessageRole},
    models::ModelOptions,
    Ollama,
};

/// Ollama provider configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            timeout_secs: 120,
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("OLLAMA_HOST").unwrap_or(defaults.host);
        let port = std::env::var("OLLAMA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let timeout_secs = std::env::var("OLLAMA_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            host,
            port,
            timeout_secs,
        }
    }

    /// Host and port to connect to. A port written into `OLLAMA_HOST`
    /// takes precedence over `port`.
    pub fn endpoint(&self) -> (String, u16) {
        let host = self.host.trim_end_matches('/');
        match host.rsplit_once(':') {
            Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) => {
                tail.parse()
                    .map_or_else(|_| (host.to_string(), self.port), |port| (head.to_string(), port))
            }
            _ => (host.to_string(), self.port),
        }
    }

    /// Base URL without trailing slash, e.g. `http://localhost:11434`
    pub fn base_url(&self) -> String {
        let (host, port) = self.endpoint();
        format!("{host}:{port}")
    }
}

/// Ollama LLM provider
pub struct OllamaProvider {
    client: Ollama,
}

impl OllamaProvider {
    /// Create from configuration
    pub fn from_config(config: &OllamaConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("HTTP client: {e}")))?;
        let (host, port) = config.endpoint();

        Ok(Self {
            client: Ollama::new_with_client(host, port, http),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(&OllamaConfig::from_env())
    }

    /// Convert agent messages to Ollama format
    fn convert_messages(messages: &[Message]) -> Vec<ChatMessage> {
        messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => MessageRole::System,
                    Role::Assistant => MessageRole::Assistant,
                    // Tool output is fed back as user context
                    Role::User | Role::Tool => MessageRole::User,
                };
                ChatMessage::new(role, m.content.clone())
            })
            .collect()
    }

    /// Build Ollama model options
    fn build_options(opts: &GenerationOptions) -> ModelOptions {
        let options = ModelOptions::default()
            .temperature(opts.temperature)
            .top_p(opts.top_p)
            .num_predict(i32::try_from(opts.max_tokens).unwrap_or(i32::MAX));

        if opts.stop_sequences.is_empty() {
            options
        } else {
            options.stop(opts.stop_sequences.clone())
        }
    }

    fn build_request(messages: &[Message], options: &GenerationOptions) -> ChatMessageRequest {
        ChatMessageRequest::new(options.model.clone(), Self::convert_messages(messages))
            .options(Self::build_options(options))
    }

    fn convert_completion(response: ChatMessageResponse) -> Completion {
        Completion {
            content: response.message.content,
            usage: response.final_data.as_ref().map(|d| TokenUsage {
                prompt_tokens: u32::try_from(d.prompt_eval_count).unwrap_or(u32::MAX),
                completion_tokens: u32::try_from(d.eval_count).unwrap_or(u32::MAX),
            }),
            model: response.model,
        }
    }
}

/// Connection failures and timeouts mean the server is unreachable,
/// anything else is an error reported by Ollama itself
fn provider_error(e: &(dyn StdError + 'static)) -> AgentError {
    let mut source = Some(e);
    while let Some(err) = source {
        if let Some(http) = err.downcast_ref::<reqwest::Error>() {
            if http.is_connect() || http.is_timeout() {
                return AgentError::ProviderUnavailable(e.to_string());
            }
        }
        source = err.source();
    }
    AgentError::Provider(e.to_string())
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn health_check(&self) -> Result<bool> {
        match self.client.list_local_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!(error = %e, "Ollama health check failed");
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = Self::build_request(messages, options);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| provider_error(&e))?;

        Ok(Self::convert_completion(response))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        Ok(models
            .into_iter()
            .map(|m| ModelInfo {
                id: m.name.clone(),
                name: m.name,
            })
            .collect())
    }
}
