//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool arguments did not match its schema
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// The model kept requesting tools after the round budget was spent
    #[error("Maximum tool rounds ({0}) reached")]
    MaxToolRounds(usize),

    /// A required value was absent or blank
    #[error("Missing value for '{0}'")]
    MissingValue(String),

    /// Session storage error
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Whether retrying the same request may succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_) | Self::Io(_))
    }

    /// Message safe to show to an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(_) | Self::ProviderUnavailable(_) => {
                "The language service is currently unavailable. Please try again.".into()
            }
            Self::ToolNotFound(name) => format!("The capability '{name}' is not available."),
            Self::ToolValidation(msg) => format!("Invalid request: {msg}"),
            Self::MaxToolRounds(_) => {
                "The request could not be completed. Please rephrase and try again.".into()
            }
            Self::MissingValue(key) => format!("A value is required for '{key}'."),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
