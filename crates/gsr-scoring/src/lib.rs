//! # gsr-scoring
//!
//! Risk scoring engine for crowd-sourced phone reports.
//! Half-life decay per report, consensus weighting by distinct reporters,
//! a swarm override driven by automated-block velocity, and the
//! persist-vs-purge decision with its country threat projection.

pub mod engine;
pub mod factors;
pub mod formula;
pub mod purge;
pub mod threat;

pub use engine::{Assessment, ScoringEngine};
pub use factors::ScoringContext;
pub use formula::{ScoreBreakdown, ScoringParams};
pub use purge::{PersistenceDecision, PurgeReason};
pub use threat::ThreatProjection;
