//! Market Search Tool
//!
//! News, definitions and facts that are not in the fund catalog.

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolContext, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::router::{CapabilityRouter, Intent};

pub struct MarketSearchTool {
    router: Arc<CapabilityRouter>,
}

impl MarketSearchTool {
    pub const fn new(router: Arc<CapabilityRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Tool for MarketSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "market_search".into(),
            description: "Search real-time market news, definitions or facts that are not in the fund database."
                .into(),
            parameters: vec![ParameterSchema::string("query", "Search query").required()],
            category: Some("research".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> CoreResult<ToolResult> {
        let query = call.str_arg("query").unwrap_or_default();
        super::respond(&self.router, "market_search", Intent::Search { query }, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use agent_core::{ProfileStore, SessionId};

    use super::*;
    use crate::svckit::testkit;

    #[tokio::test]
    async fn test_search_returns_hits() {
        let tool = MarketSearchTool::new(testkit::router());
        let id = SessionId::new();
        let mut state = ProfileStore::new();

        let call = ToolCall::new("market_search").with_arg("query", "suku bunga");
        let result = tool.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["capability"], "search");
        assert_eq!(data["data"]["hits"][0]["url"], "https://news.example/bi-rate");
    }
}
