//! # agent-runtime
//!
//! Language-model providers implementing [`agent_core::LlmProvider`].
//!
//! ## Providers
//!
//! - **Ollama** (default): local inference through the Ollama HTTP API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::OllamaProvider;
//!
//! let provider = Arc::new(OllamaProvider::from_env()?);
//! let agent = Agent::new(provider, tools, config);
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

pub use agent_core::{Agent, AgentError, LlmProvider, Message, Result, Role, Session};
