use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::filings::Deadline;
use crate::monitoring::import::MonitoredEntity;
use crate::monitoring::notifications::{EventKey, NotificationEvent};
use crate::monitoring::service::MonitorService;
use crate::monitoring::state::DeadlineState;
use crate::monitoring::store::{
    DeadlineStateStore, Enqueued, EntityId, NotificationQueue, QueueError, StoreError,
};

pub(super) const ENTITY: &str = "ent-001";
pub(super) const FORM: &str = "Form 5472";
pub(super) const VERSION: &str = "v1.0.0";

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn due_date() -> NaiveDate {
    date(2026, 4, 15)
}

pub(super) fn state(days_remaining: i64) -> DeadlineState {
    DeadlineState::derive(days_remaining, FORM, due_date(), VERSION)
}

pub(super) fn monitored(entity_id: &str, deadlines: Vec<Deadline>) -> MonitoredEntity {
    MonitoredEntity {
        entity_id: EntityId(entity_id.to_string()),
        engine_version: VERSION.to_string(),
        deadlines,
    }
}

pub(super) fn form_5472_deadline() -> Deadline {
    Deadline {
        form: FORM.to_string(),
        due_date: due_date(),
        basis: "IRC §6038A".to_string(),
    }
}

pub(super) fn build_service() -> (
    MonitorService<MemoryStates, MemoryQueue>,
    Arc<MemoryStates>,
    Arc<MemoryQueue>,
) {
    let states = Arc::new(MemoryStates::default());
    let queue = Arc::new(MemoryQueue::default());
    let service = MonitorService::new(states.clone(), queue.clone());
    (service, states, queue)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStates {
    records: Arc<Mutex<HashMap<EntityId, DeadlineState>>>,
}

impl DeadlineStateStore for MemoryStates {
    fn fetch(&self, entity_id: &EntityId) -> Result<Option<DeadlineState>, StoreError> {
        let guard = self.records.lock().expect("state mutex poisoned");
        Ok(guard.get(entity_id).cloned())
    }

    fn upsert(&self, entity_id: &EntityId, state: DeadlineState) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("state mutex poisoned");
        guard.insert(entity_id.clone(), state);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryQueue {
    keys: Arc<Mutex<HashSet<EventKey>>>,
    events: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl MemoryQueue {
    pub(super) fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().expect("queue mutex poisoned").clone()
    }
}

impl NotificationQueue for MemoryQueue {
    fn enqueue(
        &self,
        _entity_id: &EntityId,
        event: NotificationEvent,
    ) -> Result<Enqueued, QueueError> {
        let mut keys = self.keys.lock().expect("queue mutex poisoned");
        if !keys.insert(event.event_key.clone()) {
            return Ok(Enqueued::Duplicate);
        }
        self.events
            .lock()
            .expect("queue mutex poisoned")
            .push(event);
        Ok(Enqueued::Created)
    }
}

/// Store that fails for one entity and behaves like [`MemoryStates`] otherwise.
#[derive(Default)]
pub(super) struct FlakyStates {
    pub(super) failing: String,
    inner: MemoryStates,
}

impl FlakyStates {
    pub(super) fn failing_for(entity_id: &str) -> Self {
        Self {
            failing: entity_id.to_string(),
            inner: MemoryStates::default(),
        }
    }
}

impl DeadlineStateStore for FlakyStates {
    fn fetch(&self, entity_id: &EntityId) -> Result<Option<DeadlineState>, StoreError> {
        if entity_id.as_str() == self.failing {
            return Err(StoreError::Unavailable("database offline".to_string()));
        }
        self.inner.fetch(entity_id)
    }

    fn upsert(&self, entity_id: &EntityId, state: DeadlineState) -> Result<(), StoreError> {
        self.inner.upsert(entity_id, state)
    }
}

/// Queue whose first enqueue fails; later calls behave like [`MemoryQueue`].
#[derive(Default)]
pub(super) struct FailOnceQueue {
    failed: AtomicBool,
    pub(super) inner: MemoryQueue,
}

impl NotificationQueue for FailOnceQueue {
    fn enqueue(
        &self,
        entity_id: &EntityId,
        event: NotificationEvent,
    ) -> Result<Enqueued, QueueError> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            return Err(QueueError::Unavailable("broker timeout".to_string()));
        }
        self.inner.enqueue(entity_id, event)
    }
}
