//! Domain Models
//!
//! Fund categories, risk profiles and catalog records. Every number that
//! leaves this crate is a plain `f64`/`u32`; non-finite values become `0.0`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reksadana category. The taxonomy is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FundCategory {
    /// Pasar Uang
    #[serde(rename = "PU")]
    MoneyMarket,
    /// Pendapatan Tetap
    #[serde(rename = "PT")]
    FixedIncome,
    /// Campuran
    #[serde(rename = "CP")]
    Balanced,
    /// Saham
    #[serde(rename = "SH")]
    Equity,
}

impl FundCategory {
    /// All categories, ordered from lowest to highest risk
    pub const ALL: [Self; 4] = [Self::MoneyMarket, Self::FixedIncome, Self::Balanced, Self::Equity];

    pub const fn code(self) -> &'static str {
        match self {
            Self::MoneyMarket => "PU",
            Self::FixedIncome => "PT",
            Self::Balanced => "CP",
            Self::Equity => "SH",
        }
    }

    pub const fn indonesian_name(self) -> &'static str {
        match self {
            Self::MoneyMarket => "Pasar Uang",
            Self::FixedIncome => "Pendapatan Tetap",
            Self::Balanced => "Campuran",
            Self::Equity => "Saham",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::MoneyMarket => "Money Market",
            Self::FixedIncome => "Fixed Income",
            Self::Balanced => "Balanced",
            Self::Equity => "Equity",
        }
    }

    /// Exact code lookup (`"sh"`, `" PU "`)
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|c| c.code().eq_ignore_ascii_case(code))
    }

    /// Name of the per-category ranking file, e.g. `funds_sh.csv`
    pub fn ranking_file(self) -> String {
        format!("funds_{}.csv", self.code().to_ascii_lowercase())
    }
}

impl fmt::Display for FundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.indonesian_name(), self.code())
    }
}

/// Risk profile stored per conversation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskProfile {
    Unknown,
    Conservative,
    Moderate,
    Balanced,
    Aggressive,
}

impl RiskProfile {
    /// Profiles a user can choose, from most to least cautious
    pub const CHOICES: [Self; 4] = [Self::Conservative, Self::Moderate, Self::Balanced, Self::Aggressive];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Conservative => "Conservative",
            Self::Moderate => "Moderate",
            Self::Balanced => "Balanced",
            Self::Aggressive => "Aggressive",
        }
    }

    /// Interpret a stored value. English and Indonesian names are accepted in
    /// any case; anything else is `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "conservative" | "konservatif" => Self::Conservative,
            "moderate" | "moderat" => Self::Moderate,
            "balanced" | "seimbang" => Self::Balanced,
            "aggressive" | "agresif" => Self::Aggressive,
            _ => Self::Unknown,
        }
    }

    /// Categories this profile may be recommended.
    ///
    /// Each profile permits everything the previous one does plus the next
    /// category in `FundCategory::ALL`; `Unknown` permits nothing.
    pub fn allowed_categories(self) -> &'static [FundCategory] {
        let depth = match self {
            Self::Unknown => 0,
            Self::Conservative => 1,
            Self::Moderate => 2,
            Self::Balanced => 3,
            Self::Aggressive => 4,
        };
        &FundCategory::ALL[..depth]
    }

    pub fn permits(self, category: FundCategory) -> bool {
        self.allowed_categories().contains(&category)
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored fund, from a category partition or the master table
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FundRecord {
    pub name: String,

    pub category: FundCategory,

    /// Model output before per-category normalization
    pub raw_score: Option<f64>,

    /// 0-100, scaled to the category's own min/max
    pub score: f64,

    /// 1-based rank within the category (0 when the source row had none)
    pub rank: u32,

    /// Named numeric features (returns, value added, crowding, ...)
    pub features: BTreeMap<String, f64>,
}

impl FundRecord {
    pub fn new(name: impl Into<String>, category: FundCategory, score: f64, rank: u32) -> Self {
        Self {
            name: name.into(),
            category,
            raw_score: None,
            score: finite_or_zero(score),
            rank,
            features: BTreeMap::new(),
        }
    }

    pub fn with_feature(mut self, name: impl Into<String>, value: f64) -> Self {
        self.features.insert(name.into(), finite_or_zero(value));
        self
    }

    /// Feature value, `0.0` when absent
    pub fn feature(&self, name: &str) -> f64 {
        self.features.get(name).copied().unwrap_or(0.0)
    }

    /// Case-insensitive substring match on the fund name
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    pub fn summary(&self) -> FundSummary {
        FundSummary {
            name: self.name.clone(),
            score: smart_round(self.score),
            rank: self.rank,
        }
    }
}

/// Ranking entry returned to callers
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FundSummary {
    pub name: String,
    pub score: f64,
    pub rank: u32,
}

/// Global feature → weight mapping, used to explain scores
pub type FeatureWeights = BTreeMap<String, f64>;

/// Category code → historical alpha of top-ranked funds vs the remaining 90%
pub type ReliabilityTable = BTreeMap<String, f64>;

/// Replace NaN and infinities with `0.0`
pub const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Display rounding: two significant digits below 0.1, two decimals otherwise
pub fn smart_round(value: f64) -> f64 {
    let value = finite_or_zero(value);
    if value == 0.0 {
        return 0.0;
    }
    if value.abs() < 0.1 {
        return format!("{value:.1e}").parse().unwrap_or(value);
    }
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_categories_are_nested_prefixes() {
        use FundCategory::{Balanced, Equity, FixedIncome, MoneyMarket};

        assert!(RiskProfile::Unknown.allowed_categories().is_empty());
        assert_eq!(RiskProfile::Conservative.allowed_categories(), &[MoneyMarket]);
        assert_eq!(RiskProfile::Moderate.allowed_categories(), &[MoneyMarket, FixedIncome]);
        assert_eq!(
            RiskProfile::Balanced.allowed_categories(),
            &[MoneyMarket, FixedIncome, Balanced]
        );
        assert_eq!(RiskProfile::Aggressive.allowed_categories(), &FundCategory::ALL);
        assert!(RiskProfile::Aggressive.permits(Equity));

        for pair in RiskProfile::CHOICES.windows(2) {
            let (lower, upper) = (pair[0].allowed_categories(), pair[1].allowed_categories());
            assert_eq!(upper.len(), lower.len() + 1);
            assert!(lower.iter().all(|c| upper.contains(c)));
        }
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(RiskProfile::parse("conservative"), RiskProfile::Conservative);
        assert_eq!(RiskProfile::parse(" AGRESIF "), RiskProfile::Aggressive);
        assert_eq!(RiskProfile::parse("Unknown"), RiskProfile::Unknown);
        assert_eq!(RiskProfile::parse("yolo"), RiskProfile::Unknown);
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(FundCategory::from_code("sh"), Some(FundCategory::Equity));
        assert_eq!(FundCategory::from_code("XX"), None);
        assert_eq!(FundCategory::MoneyMarket.ranking_file(), "funds_pu.csv");
        assert_eq!(serde_json::to_string(&FundCategory::Balanced).unwrap(), "\"CP\"");
    }

    #[test]
    fn test_smart_round() {
        assert!((smart_round(0.0123) - 0.012).abs() < 1e-12);
        assert!((smart_round(12.3456) - 12.35).abs() < 1e-12);
        assert!((smart_round(-0.0456) + 0.046).abs() < 1e-12);
        assert!(smart_round(f64::NAN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_matching() {
        let fund = FundRecord::new("Sucorinvest Money Market Fund", FundCategory::MoneyMarket, 91.2, 1);
        assert!(fund.matches("money market"));
        assert!(!fund.matches("saham"));
    }
}
