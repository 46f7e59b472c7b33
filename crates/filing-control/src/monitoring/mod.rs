//! Deadline state tracking and idempotent notification events.
//!
//! `state` and `notifications` are pure functions over dates. `service` composes
//! them with the storage traits in `store` to run a monitor pass over imported
//! deadlines.

pub mod import;
pub mod notifications;
pub mod service;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use import::{DeadlineImportError, DeadlineImporter, MonitoredEntity};
pub use notifications::{
    build_event_key, compute_notification_events, EventKey, EventPayload, EventType,
    NotificationEvent,
};
pub use service::{MonitorError, MonitorRunSummary, MonitorService};
pub use state::{
    compute_deadline_state, derive_deadline_state, DeadlineState, DeadlineStatus, Urgency,
    AMBER_FLOOR_DAYS, DUE_SOON_WINDOW_DAYS,
};
pub use store::{
    DeadlineStateStore, Enqueued, EntityId, NotificationQueue, QueueError, StoreError,
};
