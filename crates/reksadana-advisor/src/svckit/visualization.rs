//! Visualization Tool
//!
//! Chart data for the frontend: the alpha bar chart or a head-to-head table.

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolContext, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::router::{CapabilityRouter, Intent};

pub struct VisualizationTool {
    router: Arc<CapabilityRouter>,
}

impl VisualizationTool {
    pub const fn new(router: Arc<CapabilityRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Tool for VisualizationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_visualization_data".into(),
            description: "Chart-ready data. 'performance_comparison' shows how much the top 10% of funds \
                          beat the rest per category; 'head_to_head' compares named funds."
                .into(),
            parameters: vec![
                ParameterSchema::string("viz_type", "Chart to build")
                    .required()
                    .one_of(["performance_comparison", "head_to_head"]),
                ParameterSchema::string("fund_names", "Comma-separated fund names, required for head_to_head"),
            ],
            category: Some("visualization".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> CoreResult<ToolResult> {
        let intent = Intent::Visualize {
            kind: call.str_arg("viz_type").unwrap_or_default(),
            fund_names: call.str_arg("fund_names"),
        };
        super::respond(&self.router, "get_visualization_data", intent, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use agent_core::{ProfileStore, SessionId};
    use serde_json::json;

    use super::*;
    use crate::svckit::testkit;

    #[tokio::test]
    async fn test_head_to_head_accepts_list_argument() {
        let tool = VisualizationTool::new(testkit::router());
        let id = SessionId::new();
        let mut state = ProfileStore::new();

        let call = ToolCall::new("get_visualization_data")
            .with_arg("viz_type", "head_to_head")
            .with_arg("fund_names", json!(["Manulife", "Sucorinvest"]));
        let result = tool.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["data"]["type"], "comparison_table");
        assert_eq!(data["data"]["data"].as_array().unwrap().len(), 2);
        assert_eq!(data["data"]["data"][0]["value_added"], 0.012);
    }

    #[tokio::test]
    async fn test_unknown_chart_type() {
        let tool = VisualizationTool::new(testkit::router());
        let id = SessionId::new();
        let mut state = ProfileStore::new();

        let call = ToolCall::new("get_visualization_data").with_arg("viz_type", "pie");
        let result = tool.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        assert!(!result.success);
    }
}
