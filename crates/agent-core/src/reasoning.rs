//! Reasoning Loop
//!
//! One conversation turn: the model reads the user message and either answers
//! directly or requests a tool; the tool runs against the session's memory and
//! its structured result goes back to the model, which writes the reply.
//! The number of tool rounds per turn is bounded by [`AgentConfig::max_tool_rounds`].

use std::sync::Arc;

use serde::Serialize;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};
use crate::session::Session;
use crate::tool::{ToolCall, ToolContext, ToolRegistry, ToolResult};

const TOOL_FENCE: &str = "```tool";
const FENCE: &str = "```";

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub system_prompt: String,

    /// Tool calls executed per turn before the model must answer
    pub max_tool_rounds: usize,

    pub generation: GenerationOptions,

    /// Append tool descriptions to the system prompt
    pub inject_tool_descriptions: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_tool_rounds: 1,
            generation: GenerationOptions::default(),
            inject_tool_descriptions: true,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. \
Use a tool when the answer depends on data you do not have, then summarize its result.";

/// Outcome of one conversation turn
#[derive(Clone, Debug, Serialize)]
pub struct AgentReply {
    /// Final text for the user
    pub content: String,

    /// Structured results of the tools executed during this turn
    pub tool_results: Vec<ToolResult>,
}

pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl Agent {
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    fn build_system_prompt(&self) -> String {
        let mut prompt = self.config.system_prompt.clone();

        if self.config.inject_tool_descriptions && !self.tools.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&self.tools.generate_prompt_section());
        }

        prompt
    }

    /// Process one user message within `session`
    pub async fn run(&self, session: &mut Session, user_message: &str) -> Result<AgentReply> {
        session.conversation.set_system_prompt(&self.build_system_prompt());
        session.conversation.push(Message::user(user_message));

        let mut tool_results = Vec::new();

        let reply = loop {
            let completion = self
                .provider
                .complete(session.conversation.messages(), &self.config.generation)
                .await?;
            if let Some(usage) = completion.usage {
                tracing::debug!(
                    model = %completion.model,
                    prompt_tokens = usage.prompt_tokens,
                    total_tokens = usage.total(),
                    "Completion received"
                );
            }
            let content = completion.content;
            session.conversation.push(Message::assistant(&content));

            let Some(call) = parse_tool_call(&content) else {
                break content.trim().to_string();
            };

            if tool_results.len() >= self.config.max_tool_rounds {
                let remainder = strip_tool_block(&content);
                if remainder.is_empty() {
                    return Err(AgentError::MaxToolRounds(self.config.max_tool_rounds));
                }
                tracing::debug!(tool = %call.name, "Tool budget spent; returning text portion");
                break remainder;
            }

            tracing::debug!(session = %session.id, tool = %call.name, "Executing tool");
            let mut ctx = ToolContext::new(&session.id, &mut session.state);
            let result = self.execute_tool(&call, &mut ctx).await;

            session
                .conversation
                .push(Message::tool(&result.name, format_tool_result(&result)));
            tool_results.push(result);
        };

        session.conversation.truncate_to_fit();
        session.touch();

        Ok(AgentReply {
            content: reply,
            tool_results,
        })
    }

    /// Execute a call, folding every failure into a failed `ToolResult`
    async fn execute_tool(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> ToolResult {
        match self.tools.execute(call, ctx).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "Tool call failed");
                let mut result = ToolResult::failure(&call.name, format!("Error: {e}"));
                result.id.clone_from(&call.id);
                result
            }
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

fn format_tool_result(result: &ToolResult) -> String {
    let verb = if result.success { "returned" } else { "failed" };
    format!("[Tool '{}' {}]\n{}", result.name, verb, result.output)
}

/// Extract a tool call from model output: a ```tool fenced block first,
/// then any inline JSON object carrying a "tool" key.
pub fn parse_tool_call(content: &str) -> Option<ToolCall> {
    let fenced = content.find(TOOL_FENCE).and_then(|start| {
        let body = &content[start + TOOL_FENCE.len()..];
        let end = body.find(FENCE)?;
        serde_json::from_str::<ToolCall>(body[..end].trim()).ok()
    });

    let mut call = fenced.or_else(|| parse_inline_tool_call(content))?;
    if call.id.is_none() {
        call.id = Some(uuid::Uuid::new_v4().to_string());
    }
    Some(call)
}

fn parse_inline_tool_call(content: &str) -> Option<ToolCall> {
    if !content.contains(r#""tool""#) {
        return None;
    }
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<ToolCall>(&content[start..=end]).ok()
}

fn strip_tool_block(content: &str) -> String {
    let Some(start) = content.find(TOOL_FENCE) else {
        return content.trim().to_string();
    };
    let after = &content[start + TOOL_FENCE.len()..];
    let tail = after.find(FENCE).map_or("", |end| &after[end + FENCE.len()..]);
    format!("{}{}", &content[..start], tail).trim().to_string()
}
