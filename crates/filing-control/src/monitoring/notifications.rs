use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::{DeadlineState, DeadlineStatus, Urgency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "DUE_SOON_90")]
    DueSoon90,
    #[serde(rename = "DUE_SOON_30")]
    DueSoon30,
    #[serde(rename = "DUE_SOON_7")]
    DueSoon7,
    #[serde(rename = "DUE_TODAY")]
    DueToday,
    #[serde(rename = "OVERDUE_1")]
    Overdue1,
    #[serde(rename = "STATUS_CHANGED")]
    StatusChanged,
}

impl EventType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DueSoon90 => "DUE_SOON_90",
            Self::DueSoon30 => "DUE_SOON_30",
            Self::DueSoon7 => "DUE_SOON_7",
            Self::DueToday => "DUE_TODAY",
            Self::Overdue1 => "OVERDUE_1",
            Self::StatusChanged => "STATUS_CHANGED",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At-or-below thresholds, in firing order. `OVERDUE_1` is checked separately
/// because it needs a non-negative to negative crossing, not an at-or-below one.
const THRESHOLDS: [(i64, EventType); 4] = [
    (90, EventType::DueSoon90),
    (30, EventType::DueSoon30),
    (7, EventType::DueSoon7),
    (0, EventType::DueToday),
];

/// Deduplication key for a notification. Stores must treat equal keys as one event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKey(pub String);

impl EventKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `{entity_id}:{event_type}:{form}:{date}`. The key never includes days remaining
/// or wall-clock time, so replaying a transition reproduces the same keys.
pub fn build_event_key(
    entity_id: &str,
    event_type: EventType,
    form: &str,
    date: NaiveDate,
) -> EventKey {
    EventKey(format!("{entity_id}:{event_type}:{form}:{date}"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub form: String,
    pub due_date: NaiveDate,
    pub days_remaining: i64,
    pub status: DeadlineStatus,
    pub urgency: Urgency,
    pub engine_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<DeadlineStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub event_type: EventType,
    pub event_key: EventKey,
    pub payload: EventPayload,
}

/// Events fired by moving from `prev` to `next`.
///
/// Threshold events fire once per threshold crossed, in threshold order, so a jump
/// across several thresholds reports each of them. A missing `prev` is the first
/// observation: it counts as infinitely far from due and never reports a status
/// change.
pub fn compute_notification_events(
    prev: Option<&DeadlineState>,
    next: &DeadlineState,
    entity_id: &str,
) -> Vec<NotificationEvent> {
    let prev_days = prev.map(DeadlineState::days_remaining);
    let next_days = next.days_remaining();

    let event = |event_type: EventType, previous_status: Option<DeadlineStatus>| {
        NotificationEvent {
            event_type,
            event_key: build_event_key(
                entity_id,
                event_type,
                next.next_deadline_form(),
                next.next_deadline_date(),
            ),
            payload: EventPayload {
                form: next.next_deadline_form().to_string(),
                due_date: next.next_deadline_date(),
                days_remaining: next_days,
                status: next.status(),
                urgency: next.urgency(),
                engine_version: next.engine_version().to_string(),
                previous_status,
            },
        }
    };

    let mut events: Vec<NotificationEvent> = THRESHOLDS
        .iter()
        .filter(|(threshold, _)| {
            prev_days.map_or(true, |days| days > *threshold) && next_days <= *threshold
        })
        .map(|(_, event_type)| event(*event_type, None))
        .collect();

    if prev_days.map_or(true, |days| days >= 0) && next_days < 0 {
        events.push(event(EventType::Overdue1, None));
    }

    match prev {
        None => {}
        Some(prev) if prev.status() != next.status() => {
            events.push(event(EventType::StatusChanged, Some(prev.status())));
        }
        Some(_) => {}
    }

    events
}
