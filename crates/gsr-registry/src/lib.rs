//! # gsr-registry
//!
//! The service layer: validates and records reports, answers risk lookups,
//! and runs the per-phone read, score, write cycle that keeps the score
//! store and the country threat index in step with the evidence.

pub mod deadline;
pub mod keyed_locks;
pub mod outcome;
pub mod service;
mod validation;

pub use deadline::Deadline;
pub use keyed_locks::KeyedLocks;
pub use outcome::{BatchSummary, RecomputeOutcome};
pub use service::{ReportService, Stores};
