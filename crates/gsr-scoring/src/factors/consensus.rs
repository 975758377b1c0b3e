use std::collections::HashSet;

use gsr_core::models::Report;

/// Distinct hashed reporters among human reports. Automated blocks never count.
pub fn distinct_reporters(history: &[Report]) -> usize {
    history
        .iter()
        .filter(|r| !r.is_automated())
        .map(|r| r.reporter_hash.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Consensus factor for a number of distinct reporters.
///
/// A lone reporter earns 10% trust; six or more independent reporters earn
/// full weight. Zero reporters yields zero (nothing to corroborate).
pub fn factor(reporters: usize) -> f64 {
    match reporters {
        0 => 0.0,
        1 => 0.10,
        2 => 0.20,
        3 => 0.30,
        4 => 0.50,
        5 => 0.70,
        _ => 1.00,
    }
}
