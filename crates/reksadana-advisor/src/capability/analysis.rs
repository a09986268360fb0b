//! Fund Analysis
//!
//! Explains a single fund's score by pairing the global feature weights with
//! the fund's own feature values.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::FundCatalog;
use crate::error::{AdvisorError, Result};
use crate::model::{smart_round, FeatureWeights, FundCategory};

#[derive(Clone, Debug, Serialize)]
pub struct FundAnalysis {
    pub fund_name: String,

    #[serde(rename = "type")]
    pub category: FundCategory,

    pub ai_score: f64,

    /// Historical excess return of the category's top-ranked funds over the
    /// rest. Not a confidence score.
    pub historical_alpha_top_vs_rest: f64,

    pub analysis_data: AnalysisData,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnalysisData {
    pub global_weights: FeatureWeights,
    pub fund_specifics: BTreeMap<String, f64>,
}

pub struct AnalysisHandler {
    catalog: Arc<FundCatalog>,
}

impl AnalysisHandler {
    pub const fn new(catalog: Arc<FundCatalog>) -> Self {
        Self { catalog }
    }

    pub fn analyze(&self, fund_name: &str) -> Result<FundAnalysis> {
        let query = fund_name.trim();
        if query.is_empty() {
            return Err(AdvisorError::MissingArgument("fund_name".into()));
        }

        let fund = self.catalog.find_first(query)?;
        let weights = self.catalog.weights();

        let fund_specifics = weights
            .keys()
            .filter_map(|feature| {
                fund.features
                    .get(feature)
                    .map(|value| (feature.clone(), smart_round(*value)))
            })
            .collect();

        Ok(FundAnalysis {
            fund_name: fund.name.clone(),
            category: fund.category,
            ai_score: smart_round(fund.score),
            historical_alpha_top_vs_rest: smart_round(self.catalog.alpha_for(fund.category)),
            analysis_data: AnalysisData {
                global_weights: weights.clone(),
                fund_specifics,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FundRecord;

    fn handler() -> AnalysisHandler {
        let catalog = FundCatalog::empty()
            .with_master(vec![
                FundRecord::new("Batavia Dana Saham", FundCategory::Equity, 88.456, 2)
                    .with_feature("ret_6m", 0.0834)
                    .with_feature("crowding", 1.5),
                FundRecord::new("Batavia Dana Saham Optimal", FundCategory::Equity, 91.0, 1),
            ])
            .with_weight("ret_6m", 0.7)
            .with_weight("value_added", 0.3)
            .with_reliability(FundCategory::Equity, 0.2417);
        AnalysisHandler::new(Arc::new(catalog))
    }

    #[test]
    fn test_first_match_wins() {
        let analysis = handler().analyze("batavia dana saham").unwrap();
        assert_eq!(analysis.fund_name, "Batavia Dana Saham");
        assert!((analysis.ai_score - 88.46).abs() < 1e-9);
        assert!((analysis.historical_alpha_top_vs_rest - 0.24).abs() < 1e-9);
    }

    #[test]
    fn test_only_weighted_features_are_reported() {
        let analysis = handler().analyze("Batavia").unwrap();
        let specifics = &analysis.analysis_data.fund_specifics;
        assert_eq!(specifics.len(), 1);
        assert!((specifics["ret_6m"] - 0.083).abs() < 1e-12);
        assert_eq!(analysis.analysis_data.global_weights.len(), 2);

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["type"], "SH");
    }

    #[test]
    fn test_lookup_errors() {
        assert!(matches!(handler().analyze("Mandiri"), Err(AdvisorError::FundNotFound(_))));
        assert!(matches!(handler().analyze("  "), Err(AdvisorError::MissingArgument(_))));
    }
}
