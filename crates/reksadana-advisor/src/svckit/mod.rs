//! Service Kit - Agent Tools
//!
//! Each capability is exposed to the model as an `agent_core::Tool`. Tools
//! only translate keyword arguments into an [`Intent`]; every decision is
//! made by the [`CapabilityRouter`], against the calling conversation's
//! profile store.

mod fund_analysis;
mod market_search;
mod partner_info;
mod top_funds;
mod user_profile;
mod visualization;

pub use fund_analysis::FundAnalysisTool;
pub use market_search::MarketSearchTool;
pub use partner_info::PartnerInfoTool;
pub use top_funds::TopFundsTool;
pub use user_profile::UserProfileTool;
pub use visualization::VisualizationTool;

use agent_core::{Result as CoreResult, ToolContext, ToolResult};

use crate::router::{CapabilityRouter, Intent};

/// Handle `intent` and wrap the outcome as the tool's JSON output
async fn respond(
    router: &CapabilityRouter,
    tool: &str,
    intent: Intent,
    ctx: &mut ToolContext<'_>,
) -> CoreResult<ToolResult> {
    let outcome = router.handle(intent, ctx.state).await;
    if let Some(kind) = outcome.kind() {
        tracing::debug!(tool, session = %ctx.session_id, ?kind, "Capability did not succeed");
    }
    ToolResult::json(tool, !outcome.is_error(), &outcome)
}
