//! Partner Info Tool

use std::sync::Arc;

use agent_core::{tool::ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolContext, ToolResult, ToolSchema};
use async_trait::async_trait;

use crate::router::{CapabilityRouter, Intent};

pub struct PartnerInfoTool {
    router: Arc<CapabilityRouter>,
}

impl PartnerInfoTool {
    pub const fn new(router: Arc<CapabilityRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Tool for PartnerInfoTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_partner_info".into(),
            description: "Promos, benefits and links of the channel partners where funds can be bought.".into(),
            parameters: vec![ParameterSchema::string("partner_name", "Partner to look up")
                .required()
                .one_of(["Bibit", "Bareksa", "Bank", "All"])],
            category: Some("channel".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> CoreResult<ToolResult> {
        let partner = call.str_arg("partner_name").unwrap_or_default();
        super::respond(&self.router, "get_partner_info", Intent::PartnerInfo { partner }, ctx).await
    }
}
