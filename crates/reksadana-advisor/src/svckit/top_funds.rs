//! Top Funds Tool
//!
//! Recommendation entry point. Gated by the caller's stored risk profile.

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolContext, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::router::{CapabilityRouter, Intent};

pub struct TopFundsTool {
    router: Arc<CapabilityRouter>,
}

impl TopFundsTool {
    pub const fn new(router: Arc<CapabilityRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Tool for TopFundsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_top_funds".into(),
            description: "Top 5 ranked funds of one category. Checks the user's risk profile first and may \
                          return ask_profile or refused instead of funds."
                .into(),
            // Optional so an unknown profile is asked for before the category is checked
            parameters: vec![ParameterSchema::string(
                "category",
                "Specific fund category, e.g. 'Saham', 'Pasar Uang', 'PT', 'Balanced'. Never 'Reksadana'.",
            )],
            category: Some("recommendation".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> CoreResult<ToolResult> {
        let category = call.str_arg("category").unwrap_or_default();
        super::respond(&self.router, "get_top_funds", Intent::Recommend { category }, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use agent_core::{ProfileStore, SessionId, ToolRegistry, RISK_PROFILE_KEY};

    use super::*;
    use crate::svckit::testkit;

    #[tokio::test]
    async fn test_gated_by_stored_profile() {
        let tool = TopFundsTool::new(testkit::router());
        let call = ToolCall::new("get_top_funds").with_arg("category", "pendapatan tetap");
        let id = SessionId::new();
        let mut state = ProfileStore::new();

        let result = tool.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        assert!(result.success);
        assert_eq!(result.data.as_ref().unwrap()["status"], "ask_profile");

        state.save(RISK_PROFILE_KEY, "Moderate").unwrap();
        let result = tool.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["status"], "success");
        assert_eq!(data["capability"], "ranking");
        assert_eq!(data["data"]["category"], "PT");
        assert_eq!(data["data"]["funds"][0]["rank"], 1);
    }

    #[tokio::test]
    async fn test_missing_category_still_asks_for_profile_first() {
        let mut registry = ToolRegistry::new();
        registry.register(TopFundsTool::new(testkit::router()));
        let call = ToolCall::new("get_top_funds");
        let id = SessionId::new();
        let mut state = ProfileStore::new();

        let result = registry.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        assert_eq!(result.data.unwrap()["status"], "ask_profile");

        state.save(RISK_PROFILE_KEY, "Aggressive").unwrap();
        let result = registry.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        assert_eq!(result.data.unwrap()["status"], "category_not_recognized");
    }
}
