use super::domain::{EntityProfile, PenaltyEntry, RuleResult};
use super::registry::{citation, penalty, CitationCode, PenaltyCode};

pub const DEFAULT_CLASSIFICATION: &str = "U.S. LLC";
pub const FOREIGN_SINGLE_MEMBER_CLASSIFICATION: &str = "Foreign-Owned Single-Member U.S. LLC";
pub const FORM_5472: &str = "Form 5472";
pub const PRO_FORMA_1120: &str = "Pro Forma Form 1120";

/// Classify the entity and collect its required forms, penalties, and citations.
///
/// Each rule contributes at most one form, so the lists never need de-duplication.
pub fn apply_rules(profile: &EntityProfile) -> RuleResult {
    let foreign_single_member = profile.foreign_owner && profile.single_member;

    let entity_classification = if foreign_single_member {
        FOREIGN_SINGLE_MEMBER_CLASSIFICATION
    } else {
        DEFAULT_CLASSIFICATION
    };

    let mut required_forms = Vec::new();
    let mut penalties = Vec::new();
    let mut legal_basis = Vec::new();

    if profile.has_related_party_transactions {
        required_forms.push(FORM_5472.to_string());
        legal_basis.push(citation(CitationCode::Form5472).short.to_string());
        penalties.push(penalty_entry(PenaltyCode::Form5472Failure));
    }

    if foreign_single_member {
        required_forms.push(PRO_FORMA_1120.to_string());
        legal_basis.push(citation(CitationCode::Form1120).short.to_string());
    }

    if !profile.has_ein {
        legal_basis.push(citation(CitationCode::EinRequirement).short.to_string());
    }

    RuleResult {
        entity_classification: entity_classification.to_string(),
        required_forms,
        penalties,
        legal_basis,
    }
}

fn penalty_entry(code: PenaltyCode) -> PenaltyEntry {
    let record = penalty(code);
    PenaltyEntry {
        code,
        amount: record.amount,
        currency: record.currency.to_string(),
        description: record.description.to_string(),
        citation: record.citation.to_string(),
    }
}
