use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Penalties the rule evaluator can attach to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PenaltyCode {
    #[serde(rename = "FORM_5472_FAILURE")]
    Form5472Failure,
}

impl PenaltyCode {
    pub const fn ordered() -> [Self; 1] {
        [Self::Form5472Failure]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Form5472Failure => "FORM_5472_FAILURE",
        }
    }
}

/// Published penalty schedule entry. Amounts are whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Penalty {
    pub amount: u32,
    pub currency: &'static str,
    pub description: &'static str,
    pub citation: &'static str,
    /// Date the amount was last checked against the published schedule.
    pub last_verified: &'static str,
}

pub fn penalties() -> &'static BTreeMap<PenaltyCode, Penalty> {
    static PENALTIES: OnceLock<BTreeMap<PenaltyCode, Penalty>> = OnceLock::new();
    PENALTIES.get_or_init(|| {
        PenaltyCode::ordered()
            .into_iter()
            .map(|code| (code, entry(code)))
            .collect()
    })
}

fn entry(code: PenaltyCode) -> Penalty {
    match code {
        PenaltyCode::Form5472Failure => Penalty {
            amount: 25_000,
            currency: "USD",
            description: "Failure to file Form 5472",
            citation: "IRC \u{a7}6038A(d)",
            last_verified: "2026-01-01",
        },
    }
}

pub fn penalty(code: PenaltyCode) -> &'static Penalty {
    &penalties()[&code]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn form_5472_failure_matches_published_schedule() {
        let penalty = penalty(PenaltyCode::Form5472Failure);
        assert_eq!(penalty.amount, 25_000);
        assert_eq!(penalty.currency, "USD");
        assert_eq!(penalty.citation, "IRC §6038A(d)");
    }

    #[test]
    fn verification_dates_are_iso_dates() {
        for penalty in penalties().values() {
            assert!(
                NaiveDate::parse_from_str(penalty.last_verified, "%Y-%m-%d").is_ok(),
                "bad last_verified {}",
                penalty.last_verified
            );
        }
    }

    #[test]
    fn code_serializes_as_registry_key() {
        let json = serde_json::to_string(&PenaltyCode::Form5472Failure).expect("serialize");
        assert_eq!(json, format!("\"{}\"", PenaltyCode::Form5472Failure.as_str()));
    }
}
