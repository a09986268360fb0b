//! Chart-ready payloads

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::FundCatalog;
use crate::error::{AdvisorError, Result};
use crate::model::{smart_round, ReliabilityTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VizKind {
    /// Alpha of top-ranked funds vs the rest, per category
    PerformanceComparison,
    HeadToHead,
}

impl FromStr for VizKind {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "performance_comparison" => Ok(Self::PerformanceComparison),
            "head_to_head" => Ok(Self::HeadToHead),
            _ => Err(AdvisorError::InvalidVizType(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeadToHeadRow {
    pub name: String,
    pub score: f64,
    pub return_6m: f64,
    pub value_added: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VizPayload {
    BarChart {
        title: String,
        x_axis: String,
        y_axis: String,
        data: ReliabilityTable,
    },
    ComparisonTable {
        title: String,
        data: Vec<HeadToHeadRow>,
    },
}

pub struct VisualizationHandler {
    catalog: Arc<FundCatalog>,
}

impl VisualizationHandler {
    pub const fn new(catalog: Arc<FundCatalog>) -> Self {
        Self { catalog }
    }

    pub fn get_visualization(&self, kind: VizKind, fund_names: Option<&str>) -> Result<VizPayload> {
        match kind {
            VizKind::PerformanceComparison => Ok(self.performance_comparison()),
            VizKind::HeadToHead => self.head_to_head(fund_names.unwrap_or_default()),
        }
    }

    fn performance_comparison(&self) -> VizPayload {
        VizPayload::BarChart {
            title: "Model Performance: Top 10% Funds vs Market Average (Alpha)".into(),
            x_axis: "Fund Type".into(),
            y_axis: "Excess Return (Alpha)".into(),
            data: self.catalog.reliability().clone(),
        }
    }

    fn head_to_head(&self, fund_names: &str) -> Result<VizPayload> {
        if fund_names.trim().is_empty() {
            return Err(AdvisorError::MissingArgument("fund_names".into()));
        }

        let mut rows = Vec::new();
        for name in fund_names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match self.catalog.find_first(name) {
                Ok(fund) => rows.push(HeadToHeadRow {
                    name: fund.name.clone(),
                    score: smart_round(fund.score),
                    return_6m: smart_round(fund.feature("ret_6m")),
                    value_added: smart_round(fund.feature("value_added")),
                }),
                Err(AdvisorError::FundNotFound(_)) => {
                    tracing::debug!(fund = name, "Head-to-head entry not found; skipped");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(VizPayload::ComparisonTable {
            title: "Head-to-Head Comparison".into(),
            data: rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FundCategory, FundRecord};

    fn handler() -> VisualizationHandler {
        let catalog = FundCatalog::empty()
            .with_master(vec![
                FundRecord::new("Schroder Dana Prestasi", FundCategory::Equity, 82.0, 3)
                    .with_feature("ret_6m", 0.1234)
                    .with_feature("value_added", 0.0456),
                FundRecord::new("Manulife Obligasi Negara", FundCategory::FixedIncome, 74.5, 1),
            ])
            .with_reliability(FundCategory::Equity, 0.24)
            .with_reliability(FundCategory::MoneyMarket, 0.013);
        VisualizationHandler::new(Arc::new(catalog))
    }

    #[test]
    fn test_performance_comparison_payload() {
        let payload = handler()
            .get_visualization(VizKind::PerformanceComparison, None)
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "bar_chart");
        assert_eq!(json["x_axis"], "Fund Type");
        assert_eq!(json["data"]["SH"], 0.24);
    }

    #[test]
    fn test_head_to_head_skips_misses() {
        let payload = handler()
            .get_visualization(VizKind::HeadToHead, Some("schroder, nobody , ,obligasi"))
            .unwrap();
        let VizPayload::ComparisonTable { data, .. } = payload else {
            panic!("expected comparison table");
        };
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].name, "Schroder Dana Prestasi");
        assert!((data[0].return_6m - 0.12).abs() < 1e-9);
        assert!((data[0].value_added - 0.046).abs() < 1e-12);
        assert!(data[1].value_added.abs() < f64::EPSILON);
    }

    #[test]
    fn test_head_to_head_requires_names() {
        for names in [None, Some(""), Some("   ")] {
            assert!(matches!(
                handler().get_visualization(VizKind::HeadToHead, names),
                Err(AdvisorError::MissingArgument(_))
            ));
        }
    }

    #[test]
    fn test_viz_kind_parse() {
        assert_eq!("Head_To_Head".parse::<VizKind>().unwrap(), VizKind::HeadToHead);
        assert!(matches!("pie".parse::<VizKind>(), Err(AdvisorError::InvalidVizType(_))));
    }
}
