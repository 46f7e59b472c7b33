//! Static reference tables consumed by the rule evaluator.
//!
//! Both tables are keyed by closed enums and built once on first access. Adding
//! or changing an entry changes rule output, so it must ship with a new
//! [`ENGINE_VERSION`](crate::engine::ENGINE_VERSION).

mod citations;
mod penalties;

pub use citations::{citation, citations, Citation, CitationCode};
pub use penalties::{penalties, penalty, Penalty, PenaltyCode};
