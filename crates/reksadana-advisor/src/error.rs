//! Error Types for the Reksadana Advisor

use serde::Serialize;
use thiserror::Error;

use crate::model::FundCategory;

pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Coarse classification of advisor outcomes that are not a success.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Text did not map to a known category, fund, partner or chart
    InputUnresolved,
    /// Expected catalog data or backend is missing
    DataUnavailable,
    /// A required argument was absent or blank
    MissingArgument,
    /// The risk profile does not permit the requested category.
    /// Carried by refusal outcomes only; no `AdvisorError` maps to it.
    PolicyRefusal,
}

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Category '{0}' is not recognized")]
    CategoryNotRecognized(String),

    #[error("No ranking data available for {0}")]
    CategoryUnavailable(FundCategory),

    #[error("Fund '{0}' not found")]
    FundNotFound(String),

    #[error("Partner '{query}' not found. Try {}", .options.join(", "))]
    PartnerNotFound { query: String, options: Vec<String> },

    #[error("Invalid visualization type '{0}'. Use 'performance_comparison' or 'head_to_head'")]
    InvalidVizType(String),

    #[error("Invalid action '{0}'. Use 'save' or 'read'")]
    InvalidAction(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Missing value for '{0}'")]
    MissingValue(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Catalog file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Search backend error: {0}")]
    Search(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AdvisorError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CategoryNotRecognized(_)
            | Self::FundNotFound(_)
            | Self::PartnerNotFound { .. }
            | Self::InvalidVizType(_)
            | Self::InvalidAction(_) => ErrorKind::InputUnresolved,
            Self::MissingArgument(_) | Self::MissingValue(_) => ErrorKind::MissingArgument,
            Self::CategoryUnavailable(_)
            | Self::DataUnavailable(_)
            | Self::Csv(_)
            | Self::Search(_)
            | Self::Network(_) => ErrorKind::DataUnavailable,
        }
    }
}

impl From<agent_core::AgentError> for AdvisorError {
    fn from(err: agent_core::AgentError) -> Self {
        match err {
            agent_core::AgentError::MissingValue(key) => Self::MissingValue(key),
            other => Self::DataUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy() {
        assert_eq!(
            AdvisorError::CategoryNotRecognized("x".into()).kind(),
            ErrorKind::InputUnresolved
        );
        assert_eq!(
            AdvisorError::CategoryUnavailable(FundCategory::Equity).kind(),
            ErrorKind::DataUnavailable
        );
        assert_eq!(
            AdvisorError::MissingArgument("fund_names".into()).kind(),
            ErrorKind::MissingArgument
        );
    }

    #[test]
    fn test_partner_not_found_lists_options() {
        let err = AdvisorError::PartnerNotFound {
            query: "xyz".into(),
            options: vec!["'Bibit'".into(), "'Bareksa'".into()],
        };
        assert_eq!(err.to_string(), "Partner 'xyz' not found. Try 'Bibit', 'Bareksa'");
    }
}
