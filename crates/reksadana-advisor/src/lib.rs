//! # reksadana-advisor
//!
//! Indonesian mutual fund (Reksadana) advisor: risk-profile gatekeeping,
//! capability routing and a catalog of precomputed fund rankings.
//!
//! ## Risk Gate
//!
//! Recommendations are only made inside the categories the user's stored
//! risk profile allows. Each profile extends the previous one by exactly one
//! category:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────┐
//! │ Profile      │ Allowed categories                           │
//! ├──────────────┼──────────────────────────────────────────────┤
//! │ Unknown      │ (none, ask the user first)                   │
//! │ Conservative │ PU                                           │
//! │ Moderate     │ PU  PT                                       │
//! │ Balanced     │ PU  PT  CP                                   │
//! │ Aggressive   │ PU  PT  CP  SH                               │
//! └──────────────┴──────────────────────────────────────────────┘
//!   PU Pasar Uang · PT Pendapatan Tetap · CP Campuran · SH Saham
//! ```
//!
//! The gate is ordinary code in [`router::CapabilityRouter`]; the language
//! model only picks a tool and phrases the answer.

pub mod capability;
pub mod catalog;
pub mod category;
pub mod error;
pub mod model;
pub mod policy;
pub mod router;
pub mod search;
pub mod svckit;

use std::sync::Arc;

use agent_core::ToolRegistry;

pub use catalog::{CatalogSummary, FundCatalog};
pub use category::{CategoryResolver, Resolution};
pub use error::{AdvisorError, ErrorKind, Result};
pub use model::{FundCategory, FundRecord, FundSummary, RiskProfile};
pub use policy::{Decision, PolicyEngine};
pub use router::{CapabilityRouter, HandlerInvocation, Intent, Outcome, Route};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        FundAnalysisTool, MarketSearchTool, PartnerInfoTool, TopFundsTool, UserProfileTool,
        VisualizationTool,
    };
}

/// Register every advisor tool, all sharing one router
pub fn register_tools(registry: &mut ToolRegistry, router: &Arc<CapabilityRouter>) {
    registry.register(tools::TopFundsTool::new(router.clone()));
    registry.register(tools::FundAnalysisTool::new(router.clone()));
    registry.register(tools::MarketSearchTool::new(router.clone()));
    registry.register(tools::PartnerInfoTool::new(router.clone()));
    registry.register(tools::VisualizationTool::new(router.clone()));
    registry.register(tools::UserProfileTool::new(router.clone()));
}

/// System prompt for the fund advisor agent
pub const ADVISOR_PROMPT: &str = r"You are IndoFund Advisor, an assistant for Indonesian mutual funds (Reksadana).

## Language

Always answer in the same language as the user. Refer to the product as Reksadana (Bahasa Indonesia) or Fund / Mutual Fund (English).

## Tools

Call at most one tool per message. Pick it like this:

- User states a risk profile (Conservative, Moderate, Balanced, Aggressive, or Konservatif, Moderat, Seimbang, Agresif): `manage_user_profile` with action 'save'
- User asks for the best or top funds: `get_top_funds` with a SPECIFIC category ('Saham', 'Pasar Uang', 'Pendapatan Tetap', 'Campuran'). Never pass 'Reksadana'
- User asks why a fund is good or wants deep analysis: `get_fund_analysis`
- User asks where or how to buy, or about promos: `get_partner_info`
- User asks for charts, stats or a comparison: `get_visualization_data`
- User asks about news, rates or terms that are not fund data: `market_search`

## Reading Tool Results

The tool enforces the risk policy. Never override its decision.

- status 'ask_profile': ask the user to choose Conservative, Moderate, Balanced or Aggressive, then stop
- status 'refused': politely explain that their profile does not allow that category and mention the allowed ones
- status 'category_not_recognized': ask which specific category they mean
- status 'error': explain the problem in plain words

'historical_alpha_top_vs_rest' is the historical excess return of the top-ranked funds over the rest of their category. It is NOT a confidence score.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DisabledSearchClient;

    #[test]
    fn test_register_tools() {
        let router = Arc::new(CapabilityRouter::new(
            Arc::new(FundCatalog::empty()),
            Arc::new(DisabledSearchClient),
        ));
        let mut registry = ToolRegistry::new();
        register_tools(&mut registry, &router);

        assert_eq!(
            registry.names(),
            vec![
                "get_fund_analysis",
                "get_partner_info",
                "get_top_funds",
                "get_visualization_data",
                "manage_user_profile",
                "market_search",
            ]
        );
    }
}
