//! Application State

use std::sync::Arc;

use agent_core::{Agent, LlmProvider, SessionStore, ToolRegistry};
use reksadana_advisor::FundCatalog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tool-calling agent (system prompt, tool registry, provider)
    pub agent: Arc<Agent>,

    /// Same registry the agent uses, for direct tool invocation
    pub tools: Arc<ToolRegistry>,

    /// Conversation sessions keyed by conversation id
    pub sessions: Arc<dyn SessionStore>,

    pub catalog: Arc<FundCatalog>,

    /// LLM provider (Ollama, etc.)
    pub provider: Arc<dyn LlmProvider>,

    pub model: String,
}
