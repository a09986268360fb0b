//! Tool System
//!
//! Capabilities are exposed to the model as named tools with a fixed
//! keyword-argument schema. A tool receives its arguments plus a
//! [`ToolContext`] holding the calling conversation's memory, and returns
//! JSON-serializable output only.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::session::SessionId;
use crate::state::ProfileStore;

/// Tool call request from the LLM
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier (the model may spell the key as `tool`)
    #[serde(alias = "tool")]
    pub name: String,

    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: HashMap::new(),
            id: None,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// String argument; numbers and booleans are rendered as text
    pub fn str_arg(&self, key: &str) -> Option<String> {
        match self.arguments.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => Some(other.to_string()),
        }
    }
}

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    pub name: String,

    pub id: Option<String>,

    pub success: bool,

    /// Text handed back to the model
    pub output: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: true,
            output: output.into(),
            data: None,
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(name, error)
        }
    }

    /// Build a result whose output is the JSON rendering of `value`
    pub fn json<T: Serialize>(name: impl Into<String>, success: bool, value: &T) -> Result<Self> {
        let data = serde_json::to_value(value)?;
        Ok(Self {
            name: name.into(),
            id: None,
            success,
            output: data.to_string(),
            data: Some(data),
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,

    /// JSON Schema type (string, number, boolean)
    #[serde(rename = "type")]
    pub param_type: String,

    pub description: String,

    #[serde(default)]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl ParameterSchema {
    /// Optional string parameter
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: "string".into(),
            description: description.into(),
            required: false,
            default: None,
            enum_values: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(
            values
                .into_iter()
                .map(|v| serde_json::Value::String(v.into()))
                .collect(),
        );
        self
    }
}

/// Tool definition schema (for LLM function calling)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,

    /// Description shown to the model
    pub description: String,

    pub parameters: Vec<ParameterSchema>,

    #[serde(default)]
    pub category: Option<String>,

    /// Whether the tool mutates conversation state
    #[serde(default)]
    pub has_side_effects: bool,
}

/// Execution context handed to every tool call
pub struct ToolContext<'a> {
    pub session_id: &'a SessionId,

    /// Memory of the calling conversation
    pub state: &'a mut ProfileStore,
}

impl<'a> ToolContext<'a> {
    pub const fn new(session_id: &'a SessionId, state: &'a mut ProfileStore) -> Self {
        Self { session_id, state }
    }
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    fn schema(&self) -> ToolSchema;

    async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> Result<ToolResult>;

    /// Check required parameters are present
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();
        let missing: Vec<&str> = schema
            .parameters
            .iter()
            .filter(|p| p.required && call.arguments.get(&p.name).is_none_or(serde_json::Value::is_null))
            .map(|p| p.name.as_str())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AgentError::ToolValidation(format!(
                "Missing required parameter: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Registry of available tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "Replaced previously registered tool");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Validate and execute a tool call
    pub async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> Result<ToolResult> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        tool.validate(call)?;

        let mut result = tool.execute(call, ctx).await?;
        if result.id.is_none() {
            result.id.clone_from(&call.id);
        }
        Ok(result)
    }

    /// Schemas sorted by tool name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// System prompt section describing the available tools
    pub fn generate_prompt_section(&self) -> String {
        let mut prompt = String::from("## Available Tools\n\n");
        prompt.push_str("Call exactly one tool by replying with only this block:\n\n");
        prompt.push_str("```tool\n{\"tool\": \"tool_name\", \"arguments\": {\"arg\": \"value\"}}\n```\n\n");

        for schema in self.schemas() {
            let _ = writeln!(prompt, "### {}", schema.name);
            let _ = writeln!(prompt, "{}", schema.description);

            if !schema.parameters.is_empty() {
                prompt.push_str("**Parameters:**\n");
                for param in &schema.parameters {
                    let required = if param.required { " (required)" } else { "" };
                    let _ = write!(
                        prompt,
                        "- `{}` ({}){}: {}",
                        param.name, param.param_type, required, param.description
                    );
                    if let Some(values) = &param.enum_values {
                        let options: Vec<String> = values.iter().map(ToString::to_string).collect();
                        let _ = write!(prompt, " One of: {}.", options.join(", "));
                    }
                    prompt.push('\n');
                }
            }
            prompt.push('\n');
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RISK_PROFILE_KEY;

    /// Echoes the stored risk profile back
    struct ProfileEcho;

    #[async_trait]
    impl Tool for ProfileEcho {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "profile_echo".into(),
                description: "Echo the stored profile".into(),
                parameters: vec![ParameterSchema::string("prefix", "Text to prepend").required()],
                category: None,
                has_side_effects: false,
            }
        }

        async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> Result<ToolResult> {
            let prefix = call.str_arg("prefix").unwrap_or_default();
            Ok(ToolResult::success(
                "profile_echo",
                format!("{prefix}{}", ctx.state.read(RISK_PROFILE_KEY)),
            ))
        }
    }

    #[tokio::test]
    async fn test_registry_executes_with_context() {
        let mut registry = ToolRegistry::new();
        registry.register(ProfileEcho);

        let id = SessionId::new();
        let mut state = ProfileStore::new();
        state.save(RISK_PROFILE_KEY, "Balanced").unwrap();
        let mut ctx = ToolContext::new(&id, &mut state);

        let call = ToolCall::new("profile_echo").with_arg("prefix", "profile=");
        let result = registry.execute(&call, &mut ctx).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "profile=Balanced");
    }

    #[tokio::test]
    async fn test_registry_rejects_missing_required_argument() {
        let mut registry = ToolRegistry::new();
        registry.register(ProfileEcho);

        let id = SessionId::new();
        let mut state = ProfileStore::new();
        let mut ctx = ToolContext::new(&id, &mut state);

        let err = registry
            .execute(&ToolCall::new("profile_echo"), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolValidation(_)));

        let err = registry
            .execute(&ToolCall::new("nope"), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(_)));
    }

    #[test]
    fn test_tool_call_accepts_tool_key() {
        let call: ToolCall =
            serde_json::from_str(r#"{"tool": "get_top_funds", "arguments": {"category": "SH"}}"#)
                .unwrap();
        assert_eq!(call.name, "get_top_funds");
        assert_eq!(call.str_arg("category").as_deref(), Some("SH"));
    }

    #[test]
    fn test_str_arg_joins_arrays() {
        let call = ToolCall::new("x").with_arg("fund_names", serde_json::json!(["A", "B"]));
        assert_eq!(call.str_arg("fund_names").as_deref(), Some("A,B"));
    }

    #[test]
    fn test_prompt_section_lists_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(ProfileEcho);
        let section = registry.generate_prompt_section();
        assert!(section.contains("### profile_echo"));
        assert!(section.contains("`prefix` (string) (required)"));
    }
}
