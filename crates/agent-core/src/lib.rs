//! # agent-core
//!
//! Provider-agnostic agent runtime: LLM abstraction, tool registry and
//! per-conversation sessions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Agent                              │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Turn Loop  │──│    Tools    │──│   LlmProvider       │  │
//! │  │ (1 round)   │  │  Registry   │  │   (Strategy)        │  │
//! │  └──────┬──────┘  └─────────────┘  └─────────────────────┘  │
//! │         │                                                   │
//! │  ┌──────▼──────────────────────────┐                        │
//! │  │ Session: Conversation +         │                        │
//! │  │          ProfileStore           │                        │
//! │  └─────────────────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tools receive the calling session's [`ProfileStore`] through a
//! [`ToolContext`], so conversation memory never leaks between sessions.

pub mod error;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod session;
pub mod state;
pub mod tool;

pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use provider::{LlmProvider, ScriptedProvider};
pub use reasoning::{Agent, AgentConfig, AgentReply};
pub use session::{MemorySessionStore, Session, SessionId, SessionStore};
pub use state::{ProfileStore, RISK_PROFILE_KEY, UNKNOWN};
pub use tool::{Tool, ToolCall, ToolContext, ToolRegistry, ToolResult, ToolSchema};
