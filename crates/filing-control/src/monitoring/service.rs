use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::import::MonitoredEntity;
use super::notifications::{compute_notification_events, NotificationEvent};
use super::state::{compute_deadline_state, DeadlineState};
use super::store::{
    DeadlineStateStore, Enqueued, EntityId, NotificationQueue, QueueError, StoreError,
};

/// Counters and newly created events from one monitor run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorRunSummary {
    pub processed_entities: usize,
    pub updated_states: usize,
    pub skipped_no_deadlines: usize,
    pub failed_entities: usize,
    pub created_events: usize,
    pub skipped_duplicates: usize,
    /// Events the queue rejected; their entity keeps its previous state.
    pub failed_events: usize,
    pub events: Vec<NotificationEvent>,
}

/// Per-entity failure inside a run. Logged and counted, never returned from `run`.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Recomputes deadline states and queues the notifications each change implies.
///
/// The stored state only advances once every event for the transition has been
/// queued or reported as a duplicate. A failed enqueue leaves the previous state
/// in place, so the next run recomputes the same events and the queue's key
/// uniqueness absorbs the ones that already went through.
pub struct MonitorService<S, Q> {
    states: Arc<S>,
    queue: Arc<Q>,
}

impl<S, Q> MonitorService<S, Q>
where
    S: DeadlineStateStore + 'static,
    Q: NotificationQueue + 'static,
{
    pub fn new(states: Arc<S>, queue: Arc<Q>) -> Self {
        Self { states, queue }
    }

    pub fn run(&self, entities: &[MonitoredEntity], today: NaiveDate) -> MonitorRunSummary {
        let mut summary = MonitorRunSummary {
            processed_entities: entities.len(),
            ..MonitorRunSummary::default()
        };

        for entity in entities {
            let Some(next) =
                compute_deadline_state(&entity.deadlines, &entity.engine_version, today)
            else {
                debug!(entity_id = %entity.entity_id, "no deadlines; skipping entity");
                summary.skipped_no_deadlines += 1;
                continue;
            };

            if let Err(err) = self.observe(&entity.entity_id, next, &mut summary) {
                error!(
                    entity_id = %entity.entity_id,
                    error = %err,
                    "monitor step failed; deadline state not advanced"
                );
                summary.failed_entities += 1;
            }
        }

        info!(
            processed = summary.processed_entities,
            updated = summary.updated_states,
            created_events = summary.created_events,
            duplicates = summary.skipped_duplicates,
            failed = summary.failed_entities,
            failed_events = summary.failed_events,
            "monitor run complete"
        );

        summary
    }

    fn observe(
        &self,
        entity_id: &EntityId,
        next: DeadlineState,
        summary: &mut MonitorRunSummary,
    ) -> Result<(), MonitorError> {
        let prev = self.states.fetch(entity_id)?;
        let events = compute_notification_events(prev.as_ref(), &next, entity_id.as_str());

        let mut first_failure: Option<QueueError> = None;
        for event in events {
            match self.queue.enqueue(entity_id, event.clone()) {
                Ok(Enqueued::Created) => {
                    debug!(%entity_id, event_key = %event.event_key, "notification queued");
                    summary.created_events += 1;
                    summary.events.push(event);
                }
                Ok(Enqueued::Duplicate) => {
                    debug!(%entity_id, event_key = %event.event_key, "duplicate notification skipped");
                    summary.skipped_duplicates += 1;
                }
                Err(err) => {
                    warn!(%entity_id, event_key = %event.event_key, error = %err, "notification enqueue failed");
                    summary.failed_events += 1;
                    first_failure.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_failure {
            return Err(err.into());
        }

        self.states.upsert(entity_id, next)?;
        summary.updated_states += 1;
        Ok(())
    }
}
