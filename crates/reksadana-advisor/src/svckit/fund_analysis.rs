//! Fund Analysis Tool

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolContext, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::router::{CapabilityRouter, Intent};

pub struct FundAnalysisTool {
    router: Arc<CapabilityRouter>,
}

impl FundAnalysisTool {
    pub const fn new(router: Arc<CapabilityRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Tool for FundAnalysisTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_fund_analysis".into(),
            description: "Explain why a fund scores the way it does: global feature weights, the fund's own \
                          feature values and the category's historical alpha (excess return of top funds, \
                          not a confidence score)."
                .into(),
            parameters: vec![ParameterSchema::string("fund_name", "Full or partial fund name").required()],
            category: Some("analysis".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> CoreResult<ToolResult> {
        let fund_name = call.str_arg("fund_name").unwrap_or_default();
        super::respond(&self.router, "get_fund_analysis", Intent::Analyze { fund_name }, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use agent_core::{ProfileStore, SessionId};

    use super::*;
    use crate::svckit::testkit;

    #[tokio::test]
    async fn test_analysis_is_not_gated() {
        let tool = FundAnalysisTool::new(testkit::router());
        let id = SessionId::new();
        let mut state = ProfileStore::new();

        let call = ToolCall::new("get_fund_analysis").with_arg("fund_name", "obligasi negara");
        let result = tool.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["data"]["fund_name"], "Manulife Obligasi Negara Indonesia II");
        assert_eq!(data["data"]["historical_alpha_top_vs_rest"], 0.032);
        assert_eq!(data["data"]["analysis_data"]["fund_specifics"]["ret_6m"], 0.041);

        let call = ToolCall::new("get_fund_analysis").with_arg("fund_name", "Schroder");
        let result = tool.execute(&call, &mut ToolContext::new(&id, &mut state)).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.data.unwrap()["kind"], "input_unresolved");
    }
}
