//! Capability Handlers
//!
//! Leaf services the router dispatches to. Each handler reads the shared
//! catalog and returns a serializable payload or an `AdvisorError`.

mod analysis;
mod partner;
mod ranking;
mod visualization;

pub use analysis::{AnalysisData, AnalysisHandler, FundAnalysis};
pub use partner::{Partner, PartnerDirectory, PartnerInfo};
pub use ranking::{RankingHandler, TopFunds, TOP_N};
pub use visualization::{HeadToHeadRow, VisualizationHandler, VizKind, VizPayload};
