use serde::{Deserialize, Serialize};

use super::registry::PenaltyCode;

/// Questionnaire answers describing a U.S. LLC, possibly foreign-owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProfile {
    pub foreign_owner: bool,
    pub single_member: bool,
    #[serde(rename = "hasEIN")]
    pub has_ein: bool,
    pub has_related_party_transactions: bool,
    pub has_revenue: bool,
    #[serde(rename = "prior5472Filed")]
    pub prior_5472_filed: bool,
}

/// Three-level band derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const HIGH_THRESHOLD: u32 = 80;
    pub const MODERATE_THRESHOLD: u32 = 40;

    pub const fn from_score(score: u32) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Self::High
        } else if score >= Self::MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub level: RiskLevel,
}

/// Penalty exposure attached to a rule result, copied out of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyEntry {
    pub code: PenaltyCode,
    pub amount: u32,
    pub currency: String,
    pub description: String,
    pub citation: String,
}

/// Output of the profile-driven rule evaluator.
///
/// `required_forms` and `legal_basis` are in rule-check order, not sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub entity_classification: String,
    pub required_forms: Vec<String>,
    pub penalties: Vec<PenaltyEntry>,
    pub legal_basis: Vec<String>,
}

/// Versioned merge of the risk assessment and rule result for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub entity_classification: String,
    pub required_forms: Vec<String>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub penalties: Vec<PenaltyEntry>,
    pub legal_basis: Vec<String>,
    pub version: String,
}

impl ComplianceResult {
    pub fn risk(&self) -> RiskAssessment {
        RiskAssessment {
            score: self.risk_score,
            level: self.risk_level,
        }
    }

    /// Sum of penalty amounts, grouped by currency in first-seen order.
    pub fn penalty_exposure(&self) -> Vec<(String, u64)> {
        let mut totals: Vec<(String, u64)> = Vec::new();
        for penalty in &self.penalties {
            match totals
                .iter_mut()
                .find(|(currency, _)| *currency == penalty.currency)
            {
                Some((_, total)) => *total += u64::from(penalty.amount),
                None => totals.push((penalty.currency.clone(), u64::from(penalty.amount))),
            }
        }
        totals
    }
}
