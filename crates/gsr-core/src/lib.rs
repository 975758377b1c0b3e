//! # gsr-core
//!
//! Foundation crate for the Global Spam Registry.
//! Defines the report/score data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod cancellation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancellation::{Cancellable, CancellationToken};
pub use config::GsrConfig;
pub use errors::{GsrError, GsrResult};
pub use models::{CountryThreatEntry, NormalizedPhone, PhoneScore, Report, RiskCategory, RiskTier};
