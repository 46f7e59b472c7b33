use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filings::Deadline;

/// Days-remaining breakpoint above which a deadline is not yet due soon.
pub const DUE_SOON_WINDOW_DAYS: i64 = 90;
/// Smallest days-remaining value that still counts as amber urgency.
pub const AMBER_FLOOR_DAYS: i64 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeadlineStatus {
    Current,
    DueSoon,
    Overdue,
}

impl DeadlineStatus {
    pub const fn from_days(days_remaining: i64) -> Self {
        if days_remaining > DUE_SOON_WINDOW_DAYS {
            Self::Current
        } else if days_remaining >= 0 {
            Self::DueSoon
        } else {
            Self::Overdue
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "CURRENT",
            Self::DueSoon => "DUE_SOON",
            Self::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    None,
    Amber,
    Red,
}

impl Urgency {
    pub const fn from_days(days_remaining: i64) -> Self {
        if days_remaining > DUE_SOON_WINDOW_DAYS {
            Self::None
        } else if days_remaining >= AMBER_FLOOR_DAYS {
            Self::Amber
        } else {
            Self::Red
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Amber => "AMBER",
            Self::Red => "RED",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of an entity's nearest filing deadline.
///
/// `status` and `urgency` are always derived from `days_remaining`; there are no
/// setters, and deserialization recomputes them instead of trusting stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DeadlineStateRecord")]
pub struct DeadlineState {
    next_deadline_form: String,
    next_deadline_date: NaiveDate,
    days_remaining: i64,
    status: DeadlineStatus,
    urgency: Urgency,
    engine_version: String,
}

impl DeadlineState {
    pub fn derive(
        days_remaining: i64,
        form: impl Into<String>,
        date: NaiveDate,
        engine_version: impl Into<String>,
    ) -> Self {
        Self {
            next_deadline_form: form.into(),
            next_deadline_date: date,
            days_remaining,
            status: DeadlineStatus::from_days(days_remaining),
            urgency: Urgency::from_days(days_remaining),
            engine_version: engine_version.into(),
        }
    }

    pub fn next_deadline_form(&self) -> &str {
        &self.next_deadline_form
    }

    pub fn next_deadline_date(&self) -> NaiveDate {
        self.next_deadline_date
    }

    pub fn days_remaining(&self) -> i64 {
        self.days_remaining
    }

    pub fn status(&self) -> DeadlineStatus {
        self.status
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn engine_version(&self) -> &str {
        &self.engine_version
    }
}

/// Stored shape of a deadline state; derived fields are ignored if present.
#[derive(Debug, Deserialize)]
struct DeadlineStateRecord {
    next_deadline_form: String,
    next_deadline_date: NaiveDate,
    days_remaining: i64,
    engine_version: String,
}

impl From<DeadlineStateRecord> for DeadlineState {
    fn from(record: DeadlineStateRecord) -> Self {
        Self::derive(
            record.days_remaining,
            record.next_deadline_form,
            record.next_deadline_date,
            record.engine_version,
        )
    }
}

/// Free-function form of [`DeadlineState::derive`].
pub fn derive_deadline_state(
    days_remaining: i64,
    form: impl Into<String>,
    date: NaiveDate,
    engine_version: impl Into<String>,
) -> DeadlineState {
    DeadlineState::derive(days_remaining, form, date, engine_version)
}

/// Deadline state for the earliest deadline in a schedule, as seen on `today`.
///
/// Returns `None` for an empty schedule. Ties on due date keep the first entry.
pub fn compute_deadline_state(
    deadlines: &[Deadline],
    engine_version: &str,
    today: NaiveDate,
) -> Option<DeadlineState> {
    let earliest = deadlines.iter().min_by_key(|deadline| deadline.due_date)?;
    let days_remaining = (earliest.due_date - today).num_days();

    Some(DeadlineState::derive(
        days_remaining,
        earliest.form.clone(),
        earliest.due_date,
        engine_version,
    ))
}
