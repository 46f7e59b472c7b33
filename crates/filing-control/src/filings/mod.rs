//! Entity-type-driven filing obligations and the statutory deadlines they imply.

pub mod assessment;
pub mod deadlines;
pub mod obligations;

pub use assessment::{create_assessment_snapshot, AssessmentSnapshot};
pub use deadlines::{
    calendar_year_due_date, compute_deadlines, Deadline, DeadlineProfile, DeadlineSchedule,
    DEADLINE_ENGINE_VERSION,
};
pub use obligations::{compute_obligations, EntityType, FilingInput, Obligation};
