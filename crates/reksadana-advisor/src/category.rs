//! Category Resolution
//!
//! Maps free-text category input (code, Indonesian name or English term) onto
//! a [`FundCategory`]. Umbrella words such as "reksadana" or "fund" name the
//! whole product class and never resolve to a category.

use serde::Serialize;

use crate::model::FundCategory;

const ALIASES: &[(&str, FundCategory)] = &[
    ("PU", FundCategory::MoneyMarket),
    ("PASAR UANG", FundCategory::MoneyMarket),
    ("MONEY", FundCategory::MoneyMarket),
    ("MONEY MARKET", FundCategory::MoneyMarket),
    ("PT", FundCategory::FixedIncome),
    ("PENDAPATAN TETAP", FundCategory::FixedIncome),
    ("FIXED", FundCategory::FixedIncome),
    ("FIXED INCOME", FundCategory::FixedIncome),
    ("CP", FundCategory::Balanced),
    ("CAMPURAN", FundCategory::Balanced),
    ("BALANCED", FundCategory::Balanced),
    ("SH", FundCategory::Equity),
    ("SAHAM", FundCategory::Equity),
    ("EQUITY", FundCategory::Equity),
];

/// Substring fallback, in priority order
const CONTAINS: &[(&str, FundCategory)] = &[
    ("SAHAM", FundCategory::Equity),
    ("PASAR UANG", FundCategory::MoneyMarket),
    ("PENDAPATAN TETAP", FundCategory::FixedIncome),
    ("CAMPURAN", FundCategory::Balanced),
];

const UMBRELLA_TERMS: &[&str] = &["REKSADANA", "REKSA DANA", "MUTUAL FUND", "FUND"];

/// Result of resolving category text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum Resolution {
    Category { category: FundCategory },
    NotFound { umbrella: bool },
}

impl Resolution {
    pub const fn category(self) -> Option<FundCategory> {
        match self {
            Self::Category { category } => Some(category),
            Self::NotFound { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CategoryResolver;

impl CategoryResolver {
    pub const fn new() -> Self {
        Self
    }

    pub fn resolve(&self, text: &str) -> Resolution {
        let normalized = normalize(text);

        if let Some((_, category)) = ALIASES.iter().find(|(alias, _)| *alias == normalized) {
            return Resolution::Category { category: *category };
        }

        if let Some((_, category)) = CONTAINS.iter().find(|(name, _)| normalized.contains(name)) {
            return Resolution::Category { category: *category };
        }

        let umbrella = is_umbrella(&normalized);
        tracing::debug!(input = %text, umbrella, "Category not recognized");
        Resolution::NotFound { umbrella }
    }
}

/// Uppercase, trim and collapse inner whitespace
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn is_umbrella(normalized: &str) -> bool {
    UMBRELLA_TERMS.iter().any(|term| normalized.contains(term))
}
