//! Compliance obligation and deadline notification engine for U.S. entities.
//!
//! The `engine` and `filings` modules evaluate questionnaire answers into risk
//! scores, required forms, and obligations. The `monitoring` module turns filing
//! deadlines into deadline states and idempotently keyed notification events.
//! Everything under those three modules is pure; I/O stays in `monitoring::import`,
//! the storage traits, and the binary that drives them.

pub mod config;
pub mod engine;
pub mod error;
pub mod filings;
pub mod monitoring;
pub mod telemetry;
