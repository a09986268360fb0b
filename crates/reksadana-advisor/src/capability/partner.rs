//! Channel Partners
//!
//! Where and how to buy: promos and benefits of the distribution partners.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{AdvisorError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Partner {
    #[serde(skip)]
    pub code: &'static str,
    pub name: &'static str,
    pub promo: &'static str,
    pub benefits: &'static str,
    pub link: &'static str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum PartnerInfo {
    One(Partner),
    /// Every partner keyed by code
    All(BTreeMap<&'static str, Partner>),
}

pub struct PartnerDirectory {
    partners: Vec<Partner>,
}

impl Default for PartnerDirectory {
    fn default() -> Self {
        Self::new(vec![
            Partner {
                code: "BIBIT",
                name: "Bibit",
                promo: "Cashback GoPay 50rb for new users.",
                benefits: "Robo-advisor tailored to your risk profile, free transfer fees.",
                link: "https://bibit.id",
            },
            Partner {
                code: "BAREKSA",
                name: "Bareksa",
                promo: "OVO Points 25rb for first purchase > 500rb.",
                benefits: "Wide range of funds, comprehensive analytical tools.",
                link: "https://bareksa.com",
            },
            Partner {
                code: "BANK",
                name: "Bank Partners (BCA, Mandiri)",
                promo: "Special rate for auto-debit plans.",
                benefits: "Integrated with your mobile banking, trusted security.",
                link: "https://bank-partner.com",
            },
        ])
    }
}

impl PartnerDirectory {
    /// Directory with `partners` checked in the given order
    pub const fn new(partners: Vec<Partner>) -> Self {
        Self { partners }
    }

    pub fn get_partner_info(&self, query: &str) -> Result<PartnerInfo> {
        let key = query.trim().to_uppercase();
        if key.is_empty() {
            return Err(AdvisorError::MissingArgument("partner_name".into()));
        }

        if key == "ALL" {
            return Ok(PartnerInfo::All(
                self.partners.iter().map(|p| (p.code, p.clone())).collect(),
            ));
        }

        self.partners
            .iter()
            .find(|p| p.code.contains(key.as_str()) || key.contains(p.code))
            .map(|p| PartnerInfo::One(p.clone()))
            .ok_or_else(|| AdvisorError::PartnerNotFound {
                query: query.trim().to_string(),
                options: self.partners.iter().map(|p| format!("'{}'", title_case(p.code))).collect(),
            })
    }
}

/// `BAREKSA` → `Bareksa`
fn title_case(code: &str) -> String {
    let lower = code.to_lowercase();
    let mut chars = lower.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bidirectional_match() {
        let directory = PartnerDirectory::default();

        let PartnerInfo::One(p) = directory.get_partner_info("bibit app").unwrap() else {
            panic!("expected a single partner");
        };
        assert_eq!(p.name, "Bibit");

        let PartnerInfo::One(p) = directory.get_partner_info("Bareks").unwrap() else {
            panic!("expected a single partner");
        };
        assert_eq!(p.link, "https://bareksa.com");
    }

    #[test]
    fn test_all_returns_every_partner() {
        let info = PartnerDirectory::default().get_partner_info("All").unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 3);
        assert_eq!(json["BANK"]["name"], "Bank Partners (BCA, Mandiri)");
        assert!(json["BANK"].get("code").is_none());
    }

    #[test]
    fn test_unknown_and_blank_partner() {
        let directory = PartnerDirectory::default();
        let err = directory.get_partner_info("xyz").unwrap_err();
        assert!(matches!(err, AdvisorError::PartnerNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Partner 'xyz' not found. Try 'Bibit', 'Bareksa', 'Bank'"
        );

        assert!(matches!(
            directory.get_partner_info(" "),
            Err(AdvisorError::MissingArgument(_))
        ));
    }
}
