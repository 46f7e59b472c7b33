use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::obligations::{EntityType, Obligation};

pub const DEADLINE_ENGINE_VERSION: &str = "1.0.0";

pub const FORM_5472_DEADLINE: &str = "Form 5472";
pub const PRO_FORMA_1120_DEADLINE: &str = "Pro Forma 1120";

/// Entity facts the deadline calculation needs. Calendar-year filers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineProfile {
    pub entity_type: EntityType,
    pub foreign_owned: bool,
    pub tax_year: i32,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    pub form: String,
    pub due_date: NaiveDate,
    pub basis: String,
}

/// Statutory deadlines computed for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineSchedule {
    pub engine_version: String,
    pub computed_at: DateTime<Utc>,
    pub tax_year: i32,
    pub deadlines: Vec<Deadline>,
}

/// April 15 of the year after `tax_year`, when chrono can represent it.
pub fn calendar_year_due_date(tax_year: i32) -> Option<NaiveDate> {
    tax_year
        .checked_add(1)
        .and_then(|year| NaiveDate::from_ymd_opt(year, 4, 15))
}

/// Derive filing deadlines from an obligation list.
///
/// `computed_at` is recorded verbatim so the output depends only on the inputs.
/// Deadlines are unique by form; the first obligation that triggers a form wins.
pub fn compute_deadlines(
    profile: &DeadlineProfile,
    obligations: &[Obligation],
    computed_at: DateTime<Utc>,
) -> DeadlineSchedule {
    let mut deadlines: Vec<Deadline> = Vec::new();

    match calendar_year_due_date(profile.tax_year) {
        Some(due_date) => {
            for obligation in obligations {
                let form = obligation.form.as_deref().unwrap_or_default().to_lowercase();

                if form.contains("5472") {
                    push_unique(
                        &mut deadlines,
                        FORM_5472_DEADLINE,
                        due_date,
                        "IRC \u{a7}6038A reporting due with Form 1120",
                    );
                }

                if form.contains("1120") && !form.contains("1120-f") && form.contains("pro forma") {
                    push_unique(
                        &mut deadlines,
                        PRO_FORMA_1120_DEADLINE,
                        due_date,
                        "Pro forma return due with Form 5472 (IRC \u{a7}6038A)",
                    );
                }
            }
        }
        None => warn!(
            tax_year = profile.tax_year,
            "tax year outside supported calendar range; no deadlines computed"
        ),
    }

    DeadlineSchedule {
        engine_version: DEADLINE_ENGINE_VERSION.to_string(),
        computed_at,
        tax_year: profile.tax_year,
        deadlines,
    }
}

fn push_unique(deadlines: &mut Vec<Deadline>, form: &str, due_date: NaiveDate, basis: &str) {
    if deadlines.iter().any(|deadline| deadline.form == form) {
        return;
    }

    deadlines.push(Deadline {
        form: form.to_string(),
        due_date,
        basis: basis.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile(tax_year: i32) -> DeadlineProfile {
        DeadlineProfile {
            entity_type: EntityType::Llc,
            foreign_owned: true,
            tax_year,
            state: "DE".to_string(),
        }
    }

    fn obligation(form: Option<&str>) -> Obligation {
        Obligation {
            title: "test".to_string(),
            form: form.map(str::to_string),
            authority: "IRS".to_string(),
            explanation: String::new(),
        }
    }

    fn computed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 8, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn combined_5472_obligation_yields_both_deadlines() {
        let schedule = compute_deadlines(
            &profile(2025),
            &[obligation(Some("Form 5472 + pro forma Form 1120"))],
            computed_at(),
        );

        let due = NaiveDate::from_ymd_opt(2026, 4, 15).expect("valid date");
        assert_eq!(schedule.engine_version, DEADLINE_ENGINE_VERSION);
        assert_eq!(schedule.computed_at, computed_at());
        assert_eq!(schedule.deadlines.len(), 2);
        assert_eq!(schedule.deadlines[0].form, FORM_5472_DEADLINE);
        assert_eq!(schedule.deadlines[1].form, PRO_FORMA_1120_DEADLINE);
        assert!(schedule.deadlines.iter().all(|d| d.due_date == due));
    }

    #[test]
    fn other_forms_do_not_produce_deadlines() {
        let schedule = compute_deadlines(
            &profile(2025),
            &[
                obligation(Some("Form 1120-F")),
                obligation(Some("Form 1120")),
                obligation(None),
            ],
            computed_at(),
        );
        assert!(schedule.deadlines.is_empty());
    }

    #[test]
    fn repeated_triggers_are_deduplicated() {
        let schedule = compute_deadlines(
            &profile(2025),
            &[
                obligation(Some("Form 5472 + pro forma Form 1120")),
                obligation(Some("Form 5472")),
            ],
            computed_at(),
        );
        assert_eq!(schedule.deadlines.len(), 2);
    }

    #[test]
    fn unrepresentable_year_yields_empty_schedule() {
        assert!(calendar_year_due_date(i32::MAX).is_none());
        let schedule = compute_deadlines(
            &profile(i32::MAX),
            &[obligation(Some("Form 5472"))],
            computed_at(),
        );
        assert!(schedule.deadlines.is_empty());
        assert_eq!(schedule.tax_year, i32::MAX);
    }
}
