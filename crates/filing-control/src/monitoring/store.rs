use serde::{Deserialize, Serialize};
use std::fmt;

use super::notifications::NotificationEvent;
use super::state::DeadlineState;

/// Identifier wrapper for monitored entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for the last observed deadline state per entity.
pub trait DeadlineStateStore: Send + Sync {
    fn fetch(&self, entity_id: &EntityId) -> Result<Option<DeadlineState>, StoreError>;
    fn upsert(&self, entity_id: &EntityId, state: DeadlineState) -> Result<(), StoreError>;
}

/// Outbound event queue. Implementations must enforce uniqueness on `event_key`.
pub trait NotificationQueue: Send + Sync {
    fn enqueue(
        &self,
        entity_id: &EntityId,
        event: NotificationEvent,
    ) -> Result<Enqueued, QueueError>;
}

/// Result of offering an event to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    Created,
    /// An event with the same key was already queued; nothing was added.
    Duplicate,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("deadline state store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("notification queue unavailable: {0}")]
    Unavailable(String),
}
