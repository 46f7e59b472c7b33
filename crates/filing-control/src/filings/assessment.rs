use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deadlines::{compute_deadlines, DeadlineProfile, DeadlineSchedule};
use super::obligations::{compute_obligations, FilingInput, Obligation};

/// Everything an assessment run produces, ready for the caller to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSnapshot {
    pub entity_profile: DeadlineProfile,
    pub obligations: Vec<Obligation>,
    pub deadlines: DeadlineSchedule,
}

/// Compute obligations, then the statutory deadlines they imply.
pub fn create_assessment_snapshot(
    input: &FilingInput,
    computed_at: DateTime<Utc>,
) -> AssessmentSnapshot {
    let obligations = compute_obligations(input);

    let entity_profile = DeadlineProfile {
        entity_type: input.entity_type,
        foreign_owned: input.foreign_owned,
        tax_year: input.tax_year,
        state: input.state.clone(),
    };

    let deadlines = compute_deadlines(&entity_profile, &obligations, computed_at);

    AssessmentSnapshot {
        entity_profile,
        obligations,
        deadlines,
    }
}
