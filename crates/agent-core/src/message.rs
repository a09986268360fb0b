//! Conversation Messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt/instructions
    System,
    /// User input
    User,
    /// Assistant (LLM) response
    Assistant,
    /// Structured capability output fed back to the model
    Tool,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Text content
    pub content: String,

    /// Name of the tool that produced this message (tool messages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_name: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a tool result message
    pub fn tool(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            ..Self::new(Role::Tool, content)
        }
    }

    /// Rough token estimate (~4 chars per token plus role overhead)
    pub fn estimate_tokens(&self) -> u32 {
        u32::try_from(self.content.len() / 4).unwrap_or(u32::MAX).saturating_add(4)
    }
}

fn default_max_context() -> u32 {
    8192
}

/// Message history of one conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,

    /// Token budget enforced by [`Conversation::truncate_to_fit`]
    #[serde(default = "default_max_context")]
    max_context_tokens: u32,
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            max_context_tokens: default_max_context(),
        }
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation that starts with a system prompt
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        let mut conv = Self::new();
        conv.push(Message::system(prompt));
        conv
    }

    pub fn with_max_context_tokens(mut self, max: u32) -> Self {
        self.max_context_tokens = max;
        self
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Install `prompt` as the leading system message, replacing any existing one
    pub fn set_system_prompt(&mut self, prompt: &str) {
        match self.messages.first_mut() {
            Some(first) if first.role == Role::System => {
                if first.content != prompt {
                    first.content = prompt.to_string();
                }
            }
            _ => self.messages.insert(0, Message::system(prompt)),
        }
    }

    /// Estimated tokens across all messages
    pub fn estimate_tokens(&self) -> u32 {
        self.messages.iter().map(Message::estimate_tokens).sum()
    }

    /// Drop the oldest non-system messages until the history fits the budget.
    /// The most recent message is always kept.
    pub fn truncate_to_fit(&mut self) {
        while self.estimate_tokens() > self.max_context_tokens {
            let last = self.messages.len().saturating_sub(1);
            match self.messages.iter().position(|m| m.role != Role::System) {
                Some(pos) if pos < last => {
                    self.messages.remove(pos);
                }
                _ => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
