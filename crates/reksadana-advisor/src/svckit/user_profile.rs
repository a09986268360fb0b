//! User Profile Tool
//!
//! The only writer of conversation memory. The stored `risk_profile` drives
//! the recommendation gate.

use std::sync::Arc;

use agent_core::{
    tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolContext, ToolResult, ToolSchema,
    RISK_PROFILE_KEY,
};
use async_trait::async_trait;

use crate::error::AdvisorError;
use crate::router::{CapabilityRouter, Intent, Outcome};

pub struct UserProfileTool {
    router: Arc<CapabilityRouter>,
}

impl UserProfileTool {
    pub const fn new(router: Arc<CapabilityRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Tool for UserProfileTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "manage_user_profile".into(),
            description: "Save or read user memory. Save the risk profile as soon as the user states it \
                          (Conservative, Moderate, Balanced or Aggressive)."
                .into(),
            parameters: vec![
                ParameterSchema::string("action", "'save' to store a value, 'read' to fetch it")
                    .required()
                    .one_of(["save", "read"]),
                ParameterSchema::string("key", "Memory key").default_value(RISK_PROFILE_KEY),
                ParameterSchema::string("value", "Value to store (save only)"),
            ],
            category: Some("memory".into()),
            has_side_effects: true,
        }
    }

    async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> CoreResult<ToolResult> {
        const NAME: &str = "manage_user_profile";

        let key = call
            .str_arg("key")
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| RISK_PROFILE_KEY.to_string());

        let action = call.str_arg("action").unwrap_or_default();
        let intent = match action.trim().to_ascii_lowercase().as_str() {
            "save" => Intent::SaveProfile {
                key,
                value: call.str_arg("value"),
            },
            "read" => Intent::ReadProfile { key },
            _ => {
                let outcome = Outcome::from_error(&AdvisorError::InvalidAction(action));
                return ToolResult::json(NAME, false, &outcome);
            }
        };

        super::respond(&self.router, NAME, intent, ctx).await
    }
}
