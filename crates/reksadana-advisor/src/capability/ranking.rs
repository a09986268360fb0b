//! Top funds per category

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::FundCatalog;
use crate::error::{AdvisorError, Result};
use crate::model::{FundCategory, FundSummary};

/// Number of funds returned by a recommendation
pub const TOP_N: usize = 5;

#[derive(Clone, Debug, Serialize)]
pub struct TopFunds {
    pub category: FundCategory,
    pub category_name: &'static str,
    pub english_name: &'static str,
    pub funds: Vec<FundSummary>,
}

pub struct RankingHandler {
    catalog: Arc<FundCatalog>,
}

impl RankingHandler {
    pub const fn new(catalog: Arc<FundCatalog>) -> Self {
        Self { catalog }
    }

    pub fn get_top_funds(&self, category: FundCategory) -> Result<TopFunds> {
        let partition = self
            .catalog
            .partition(category)
            .ok_or(AdvisorError::CategoryUnavailable(category))?;

        Ok(TopFunds {
            category,
            category_name: category.indonesian_name(),
            english_name: category.english_name(),
            funds: partition.iter().take(TOP_N).map(|f| f.summary()).collect(),
        })
    }
}
