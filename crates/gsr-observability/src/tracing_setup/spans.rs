//! Span definitions per operation: recompute, ingest, sweep.

/// Create a recompute span.
#[macro_export]
macro_rules! recompute_span {
    ($phone:expr) => {
        tracing::info_span!("gsr.recompute", phone = %$phone)
    };
}

/// Create an ingest span.
#[macro_export]
macro_rules! ingest_span {
    ($phone:expr, $category:expr) => {
        tracing::info_span!("gsr.ingest", phone = %$phone, category = %$category)
    };
}

/// Create a sweep span.
#[macro_export]
macro_rules! sweep_span {
    () => {
        tracing::info_span!("gsr.sweep")
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RECOMPUTE: &str = "gsr.recompute";
    pub const INGEST: &str = "gsr.ingest";
    pub const SWEEP: &str = "gsr.sweep";
}
