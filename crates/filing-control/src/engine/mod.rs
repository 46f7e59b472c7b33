//! Profile-driven compliance evaluation for foreign-owned U.S. LLCs.

pub mod domain;
pub mod questionnaire;
pub mod registry;
mod risk;
mod rules;

pub use domain::{
    ComplianceResult, EntityProfile, PenaltyEntry, RiskAssessment, RiskLevel, RuleResult,
};
pub use questionnaire::{Question, QuestionnaireError, QUESTIONS};
pub use risk::calculate_risk;
pub use rules::{
    apply_rules, DEFAULT_CLASSIFICATION, FOREIGN_SINGLE_MEMBER_CLASSIFICATION, FORM_5472,
    PRO_FORMA_1120,
};

/// Rule-set version stamped on every result. Bump on any change to rule output.
pub const ENGINE_VERSION: &str = "v1.0.0";

/// Run the risk scorer and rule evaluator together and tag the result with
/// [`ENGINE_VERSION`]. Identical profiles always produce identical results.
pub fn evaluate_compliance(profile: &EntityProfile) -> ComplianceResult {
    let risk = calculate_risk(profile);
    let rules = apply_rules(profile);

    ComplianceResult {
        entity_classification: rules.entity_classification,
        required_forms: rules.required_forms,
        risk_score: risk.score,
        risk_level: risk.level,
        penalties: rules.penalties,
        legal_basis: rules.legal_basis,
        version: ENGINE_VERSION.to_string(),
    }
}
