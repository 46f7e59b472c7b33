use chrono::{DateTime, NaiveDate, Utc};
use filing_control::error::AppError;
use filing_control::monitoring::{
    DeadlineState, DeadlineStateStore, Enqueued, EntityId, EventKey, NotificationEvent,
    NotificationQueue, QueueError, StoreError,
};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Deadline states keyed by entity, loadable from and exportable to a JSON map.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDeadlineStateStore {
    records: Arc<Mutex<BTreeMap<EntityId, DeadlineState>>>,
}

impl InMemoryDeadlineStateStore {
    pub(crate) fn from_json(raw: &str) -> Result<Self, AppError> {
        let records: BTreeMap<EntityId, DeadlineState> = serde_json::from_str(raw)?;
        Ok(Self {
            records: Arc::new(Mutex::new(records)),
        })
    }

    /// Missing files start an empty store so the first run can create them.
    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub(crate) fn to_json(&self) -> Result<String, AppError> {
        let guard = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(serde_json::to_string_pretty(&*guard)?)
    }
}

impl DeadlineStateStore for InMemoryDeadlineStateStore {
    fn fetch(&self, entity_id: &EntityId) -> Result<Option<DeadlineState>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("state store mutex poisoned".to_string()))?;
        Ok(guard.get(entity_id).cloned())
    }

    fn upsert(&self, entity_id: &EntityId, state: DeadlineState) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("state store mutex poisoned".to_string()))?;
        guard.insert(entity_id.clone(), state);
        Ok(())
    }
}

/// Queue that only remembers keys; delivery is out of scope for the CLI.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationQueue {
    keys: Arc<Mutex<HashSet<EventKey>>>,
}

impl NotificationQueue for InMemoryNotificationQueue {
    fn enqueue(
        &self,
        _entity_id: &EntityId,
        event: NotificationEvent,
    ) -> Result<Enqueued, QueueError> {
        let mut guard = self
            .keys
            .lock()
            .map_err(|_| QueueError::Unavailable("queue mutex poisoned".to_string()))?;
        if guard.insert(event.event_key) {
            Ok(Enqueued::Created)
        } else {
            Ok(Enqueued::Duplicate)
        }
    }
}

/// Read a whole file, or stdin when `source` is `-`.
pub(crate) fn read_source(source: &Path) -> Result<String, AppError> {
    if source == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
