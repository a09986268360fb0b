//! Capability Router
//!
//! Turns an extracted [`Intent`] into exactly one handler invocation or a
//! designed non-invocation outcome (ask for a profile, refuse, re-prompt).
//!
//! Recommendations are the only gated path:
//!
//! ```text
//! Recommend(text)
//!   ├─ stored profile Unknown ──────────────► AskProfile      (no resolution, no catalog)
//!   ├─ category text unresolved ────────────► CategoryNotRecognized
//!   ├─ category ∉ AllowedCategories(profile) ► Refuse(allowed)
//!   └─ otherwise ───────────────────────────► RankingHandler
//! ```
//!
//! Analysis, search, partner info and visualization dispatch directly.
//! Profile save/read are served from the conversation's own store.

use std::sync::Arc;

use agent_core::{ProfileStore, RISK_PROFILE_KEY};
use serde::Serialize;

use crate::capability::{
    AnalysisHandler, FundAnalysis, PartnerDirectory, PartnerInfo, RankingHandler, TopFunds,
    VisualizationHandler, VizKind, VizPayload,
};
use crate::catalog::FundCatalog;
use crate::category::{CategoryResolver, Resolution};
use crate::error::{AdvisorError, ErrorKind, Result};
use crate::model::{FundCategory, RiskProfile};
use crate::policy::{Decision, PolicyEngine};
use crate::search::{SearchClient, SearchHandler, SearchResults};

/// What the user asked for, with its slots already extracted
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Recommend { category: String },
    Analyze { fund_name: String },
    Search { query: String },
    PartnerInfo { partner: String },
    Visualize { kind: String, fund_names: Option<String> },
    SaveProfile { key: String, value: Option<String> },
    ReadProfile { key: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Ranking,
    Analysis,
    Search,
    PartnerInfo,
    Visualization,
}

/// A handler call the router decided to make
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerInvocation {
    TopFunds(FundCategory),
    Analysis { fund_name: String },
    Search { query: String },
    Partner { key: String },
    Visualization { kind: VizKind, fund_names: Option<String> },
}

impl HandlerInvocation {
    pub const fn capability(&self) -> Capability {
        match self {
            Self::TopFunds(_) => Capability::Ranking,
            Self::Analysis { .. } => Capability::Analysis,
            Self::Search { .. } => Capability::Search,
            Self::Partner { .. } => Capability::PartnerInfo,
            Self::Visualization { .. } => Capability::Visualization,
        }
    }
}

/// Routing decision for one intent
#[derive(Debug)]
pub enum Route {
    Invoke(HandlerInvocation),
    AskProfile,
    Refuse {
        profile: RiskProfile,
        requested: FundCategory,
        allowed: Vec<FundCategory>,
    },
    CategoryNotRecognized {
        input: String,
        umbrella: bool,
    },
    ProfileSaved {
        key: String,
        value: String,
        previous: Option<String>,
    },
    ProfileRead {
        key: String,
        value: String,
    },
    Rejected(AdvisorError),
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Payload {
    TopFunds(TopFunds),
    Analysis(FundAnalysis),
    Search(SearchResults),
    Partner(PartnerInfo),
    Visualization(VizPayload),
}

/// Structured result of handling one intent. Never a panic, never a bare error.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        capability: Capability,
        data: Payload,
    },
    AskProfile {
        message: String,
        options: Vec<RiskProfile>,
    },
    Refused {
        profile: RiskProfile,
        requested: FundCategory,
        allowed: Vec<FundCategory>,
        message: String,
    },
    CategoryNotRecognized {
        input: String,
        umbrella: bool,
        options: Vec<FundCategory>,
        message: String,
    },
    ProfileSaved {
        key: String,
        value: String,
        message: String,
    },
    ProfileRead {
        key: String,
        value: String,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl Outcome {
    pub fn from_error(err: &AdvisorError) -> Self {
        Self::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Taxonomy kind for every outcome that is not a plain success
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Refused { .. } => Some(ErrorKind::PolicyRefusal),
            Self::CategoryNotRecognized { .. } => Some(ErrorKind::InputUnresolved),
            Self::Error { kind, .. } => Some(*kind),
            Self::Success { .. }
            | Self::AskProfile { .. }
            | Self::ProfileSaved { .. }
            | Self::ProfileRead { .. } => None,
        }
    }
}

pub struct CapabilityRouter {
    resolver: CategoryResolver,
    policy: PolicyEngine,
    ranking: RankingHandler,
    analysis: AnalysisHandler,
    visualization: VisualizationHandler,
    partners: PartnerDirectory,
    search: SearchHandler,
}

impl CapabilityRouter {
    pub fn new(catalog: Arc<FundCatalog>, search: Arc<dyn SearchClient>) -> Self {
        Self {
            resolver: CategoryResolver::new(),
            policy: PolicyEngine::new(),
            ranking: RankingHandler::new(catalog.clone()),
            analysis: AnalysisHandler::new(catalog.clone()),
            visualization: VisualizationHandler::new(catalog),
            partners: PartnerDirectory::default(),
            search: SearchHandler::new(search),
        }
    }

    /// Decide what to do with `intent`. Profile intents are applied to
    /// `store` here; everything else only reads it.
    pub fn route(&self, intent: Intent, store: &mut ProfileStore) -> Route {
        let route = match intent {
            Intent::Recommend { category } => self.route_recommend(&category, store),
            Intent::Analyze { fund_name } => Route::Invoke(HandlerInvocation::Analysis { fund_name }),
            Intent::Search { query } => Route::Invoke(HandlerInvocation::Search { query }),
            Intent::PartnerInfo { partner } => Route::Invoke(HandlerInvocation::Partner { key: partner }),
            Intent::Visualize { kind, fund_names } => match kind.parse::<VizKind>() {
                Ok(kind) => Route::Invoke(HandlerInvocation::Visualization { kind, fund_names }),
                Err(e) => Route::Rejected(e),
            },
            Intent::SaveProfile { key, value } => {
                let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
                    return Route::Rejected(AdvisorError::MissingValue(key));
                };
                match store.save(&key, &value) {
                    Ok(previous) => Route::ProfileSaved {
                        key: key.trim().to_string(),
                        value,
                        previous,
                    },
                    Err(e) => Route::Rejected(e.into()),
                }
            }
            Intent::ReadProfile { key } => Route::ProfileRead {
                value: store.read(&key).to_string(),
                key,
            },
        };

        tracing::debug!(route = ?route, "Routed intent");
        route
    }

    fn route_recommend(&self, text: &str, store: &ProfileStore) -> Route {
        let profile = RiskProfile::parse(store.read(RISK_PROFILE_KEY));
        if profile == RiskProfile::Unknown {
            return Route::AskProfile;
        }

        let category = match self.resolver.resolve(text) {
            Resolution::Category { category } => category,
            Resolution::NotFound { umbrella } => {
                return Route::CategoryNotRecognized {
                    input: text.trim().to_string(),
                    umbrella,
                };
            }
        };

        match self.policy.decide(profile, category) {
            Decision::Allow => Route::Invoke(HandlerInvocation::TopFunds(category)),
            Decision::AskProfile => Route::AskProfile,
            Decision::Refuse { allowed } => {
                tracing::info!(%profile, requested = category.code(), "Recommendation refused by risk policy");
                Route::Refuse {
                    profile,
                    requested: category,
                    allowed,
                }
            }
        }
    }

    /// Run a handler
    pub async fn dispatch(&self, invocation: HandlerInvocation) -> Result<Payload> {
        match invocation {
            HandlerInvocation::TopFunds(category) => self.ranking.get_top_funds(category).map(Payload::TopFunds),
            HandlerInvocation::Analysis { fund_name } => self.analysis.analyze(&fund_name).map(Payload::Analysis),
            HandlerInvocation::Search { query } => self.search.search(&query).await.map(Payload::Search),
            HandlerInvocation::Partner { key } => self.partners.get_partner_info(&key).map(Payload::Partner),
            HandlerInvocation::Visualization { kind, fund_names } => self
                .visualization
                .get_visualization(kind, fund_names.as_deref())
                .map(Payload::Visualization),
        }
    }

    /// Route and dispatch one intent against a conversation's store
    pub async fn handle(&self, intent: Intent, store: &mut ProfileStore) -> Outcome {
        match self.route(intent, store) {
            Route::Invoke(invocation) => {
                let capability = invocation.capability();
                match self.dispatch(invocation).await {
                    Ok(data) => Outcome::Success { capability, data },
                    Err(e) => {
                        tracing::warn!(?capability, error = %e, "Capability failed");
                        Outcome::from_error(&e)
                    }
                }
            }
            Route::AskProfile => Outcome::AskProfile {
                message: ask_profile_message(),
                options: RiskProfile::CHOICES.to_vec(),
            },
            Route::Refuse {
                profile,
                requested,
                allowed,
            } => Outcome::Refused {
                message: refusal_message(profile, requested, &allowed),
                profile,
                requested,
                allowed,
            },
            Route::CategoryNotRecognized { input, umbrella } => Outcome::CategoryNotRecognized {
                message: unrecognized_message(&input, umbrella),
                input,
                umbrella,
                options: FundCategory::ALL.to_vec(),
            },
            Route::ProfileSaved { key, value, previous } => Outcome::ProfileSaved {
                message: match previous {
                    Some(old) if old != value => format!("Updated {key}: {old} -> {value}"),
                    _ => format!("Saved {key}: {value}"),
                },
                key,
                value,
            },
            Route::ProfileRead { key, value } => Outcome::ProfileRead { key, value },
            Route::Rejected(e) => Outcome::from_error(&e),
        }
    }
}

fn ask_profile_message() -> String {
    let choices: Vec<&str> = RiskProfile::CHOICES.iter().map(|p| p.as_str()).collect();
    format!(
        "Your risk profile is not known yet. Please choose one: {}.",
        choices.join(", ")
    )
}

fn category_list(categories: &[FundCategory]) -> String {
    categories
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn refusal_message(profile: RiskProfile, requested: FundCategory, allowed: &[FundCategory]) -> String {
    format!(
        "Based on your {profile} profile, I cannot recommend {requested}. Allowed categories: {}.",
        category_list(allowed)
    )
}

fn unrecognized_message(input: &str, umbrella: bool) -> String {
    if umbrella {
        format!(
            "'{input}' covers every fund type. Please pick a specific category: {}.",
            category_list(&FundCategory::ALL)
        )
    } else {
        format!(
            "Category '{input}' is not recognized. Choose one of: {}.",
            category_list(&FundCategory::ALL)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FundRecord;
    use crate::search::StaticSearchClient;

    fn catalog() -> Arc<FundCatalog> {
        Arc::new(
            FundCatalog::empty()
                .with_partition(
                    FundCategory::MoneyMarket,
                    vec![
                        FundRecord::new("Sucorinvest Money Market Fund", FundCategory::MoneyMarket, 98.0, 1),
                        FundRecord::new("Batavia Dana Kas Maxima", FundCategory::MoneyMarket, 91.0, 2),
                    ],
                )
                .with_partition(
                    FundCategory::Equity,
                    vec![FundRecord::new("Trimegah Saham Unggulan", FundCategory::Equity, 95.0, 1)],
                )
                .with_master(vec![FundRecord::new(
                    "Trimegah Saham Unggulan",
                    FundCategory::Equity,
                    95.0,
                    1,
                )]),
        )
    }

    fn router() -> CapabilityRouter {
        CapabilityRouter::new(catalog(), Arc::new(StaticSearchClient::new([])))
    }

    fn recommend(text: &str) -> Intent {
        Intent::Recommend { category: text.into() }
    }

    fn save_profile(router: &CapabilityRouter, store: &mut ProfileStore, value: &str) {
        let route = router.route(
            Intent::SaveProfile {
                key: RISK_PROFILE_KEY.into(),
                value: Some(value.into()),
            },
            store,
        );
        assert!(matches!(route, Route::ProfileSaved { .. }));
    }

    #[tokio::test]
    async fn test_unknown_profile_then_conservative_refusal() {
        let router = router();
        let mut store = ProfileStore::new();

        let route = router.route(recommend("best saham fund"), &mut store);
        assert!(matches!(route, Route::AskProfile));

        let outcome = router.handle(recommend("best saham fund"), &mut store).await;
        let Outcome::AskProfile { options, .. } = outcome else {
            panic!("expected AskProfile, got {outcome:?}");
        };
        assert_eq!(options.len(), 4);

        save_profile(&router, &mut store, "Conservative");

        let outcome = router.handle(recommend("best saham fund"), &mut store).await;
        let Outcome::Refused { allowed, message, .. } = &outcome else {
            panic!("expected Refused, got {outcome:?}");
        };
        assert_eq!(allowed, &vec![FundCategory::MoneyMarket]);
        assert!(message.contains("Pasar Uang (PU)"));
        assert_eq!(outcome.kind(), Some(ErrorKind::PolicyRefusal));
    }

    #[test]
    fn test_unknown_profile_skips_category_resolution() {
        let mut store = ProfileStore::new();
        let route = router().route(recommend("Reksadana"), &mut store);
        assert!(matches!(route, Route::AskProfile));
    }

    #[tokio::test]
    async fn test_allowed_recommendation_dispatches_ranking() {
        let router = router();
        let mut store = ProfileStore::new();
        save_profile(&router, &mut store, "moderat");

        let route = router.route(recommend("pasar uang"), &mut store);
        assert!(matches!(
            route,
            Route::Invoke(HandlerInvocation::TopFunds(FundCategory::MoneyMarket))
        ));

        let outcome = router.handle(recommend("PU"), &mut store).await;
        let Outcome::Success {
            capability,
            data: Payload::TopFunds(top),
        } = outcome
        else {
            panic!("expected ranking payload");
        };
        assert_eq!(capability, Capability::Ranking);
        assert_eq!(top.funds[0].name, "Sucorinvest Money Market Fund");
    }

    #[tokio::test]
    async fn test_umbrella_category_is_reprompted() {
        let router = router();
        let mut store = ProfileStore::new();
        save_profile(&router, &mut store, "Aggressive");

        let outcome = router.handle(recommend("Reksadana"), &mut store).await;
        let Outcome::CategoryNotRecognized { umbrella, .. } = outcome else {
            panic!("expected CategoryNotRecognized");
        };
        assert!(umbrella);
    }

    #[tokio::test]
    async fn test_missing_partition_is_data_unavailable() {
        let router = router();
        let mut store = ProfileStore::new();
        save_profile(&router, &mut store, "Balanced");

        let outcome = router.handle(recommend("campuran"), &mut store).await;
        assert!(outcome.is_error());
        assert_eq!(outcome.kind(), Some(ErrorKind::DataUnavailable));
    }

    #[tokio::test]
    async fn test_ungated_intents_ignore_profile() {
        let router = router();
        let mut store = ProfileStore::new();

        let outcome = router
            .handle(Intent::Analyze { fund_name: "trimegah".into() }, &mut store)
            .await;
        assert!(matches!(
            outcome,
            Outcome::Success {
                capability: Capability::Analysis,
                ..
            }
        ));

        let outcome = router
            .handle(Intent::PartnerInfo { partner: "xyz".into() }, &mut store)
            .await;
        assert_eq!(outcome.kind(), Some(ErrorKind::InputUnresolved));

        let outcome = router
            .handle(
                Intent::Visualize {
                    kind: "head_to_head".into(),
                    fund_names: Some(String::new()),
                },
                &mut store,
            )
            .await;
        assert_eq!(outcome.kind(), Some(ErrorKind::MissingArgument));

        let route = router.route(
            Intent::Visualize {
                kind: "pie".into(),
                fund_names: None,
            },
            &mut store,
        );
        assert!(matches!(route, Route::Rejected(AdvisorError::InvalidVizType(_))));
    }

    #[tokio::test]
    async fn test_profile_save_and_read() {
        let router = router();
        let mut store = ProfileStore::new();

        let read = Intent::ReadProfile {
            key: RISK_PROFILE_KEY.into(),
        };
        let outcome = router.handle(read.clone(), &mut store).await;
        assert!(matches!(outcome, Outcome::ProfileRead { ref value, .. } if value == "Unknown"));

        let outcome = router
            .handle(
                Intent::SaveProfile {
                    key: RISK_PROFILE_KEY.into(),
                    value: Some("  ".into()),
                },
                &mut store,
            )
            .await;
        assert_eq!(outcome.kind(), Some(ErrorKind::MissingArgument));

        save_profile(&router, &mut store, "Aggressive");
        save_profile(&router, &mut store, "Aggressive");
        assert_eq!(store.len(), 1);

        let outcome = router.handle(read, &mut store).await;
        assert!(matches!(outcome, Outcome::ProfileRead { ref value, .. } if value == "Aggressive"));
    }

    #[test]
    fn test_outcome_wire_shape() {
        let outcome = Outcome::Refused {
            profile: RiskProfile::Conservative,
            requested: FundCategory::Equity,
            allowed: vec![FundCategory::MoneyMarket],
            message: String::new(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "refused");
        assert_eq!(json["allowed"][0], "PU");
        assert_eq!(json["profile"], "Conservative");
    }
}
