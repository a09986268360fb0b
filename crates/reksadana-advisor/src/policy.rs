//! Risk Policy
//!
//! Decides whether a category may be recommended to a user with a given risk
//! profile. The decision is a pure function of its two inputs.

use serde::Serialize;

use crate::model::{FundCategory, RiskProfile};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    /// No profile on record; the user has to state one first
    AskProfile,
    Refuse { allowed: Vec<FundCategory> },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PolicyEngine;

impl PolicyEngine {
    pub const fn new() -> Self {
        Self
    }

    pub fn decide(&self, profile: RiskProfile, category: FundCategory) -> Decision {
        if profile == RiskProfile::Unknown {
            return Decision::AskProfile;
        }

        if profile.permits(category) {
            Decision::Allow
        } else {
            Decision::Refuse {
                allowed: profile.allowed_categories().to_vec(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_always_asks() {
        let policy = PolicyEngine::new();
        for category in FundCategory::ALL {
            assert_eq!(policy.decide(RiskProfile::Unknown, category), Decision::AskProfile);
        }
    }

    #[test]
    fn test_conservative_refused_equity() {
        assert_eq!(
            PolicyEngine::new().decide(RiskProfile::Conservative, FundCategory::Equity),
            Decision::Refuse {
                allowed: vec![FundCategory::MoneyMarket]
            }
        );
    }

    #[test]
    fn test_decision_matches_allowed_set() {
        let policy = PolicyEngine::new();
        for profile in RiskProfile::CHOICES {
            for category in FundCategory::ALL {
                let allowed = profile.permits(category);
                assert_eq!(policy.decide(profile, category) == Decision::Allow, allowed);
            }
        }
    }
}
