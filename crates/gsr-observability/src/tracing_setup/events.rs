//! Structured log events for key registry operations.
//!
//! Reporter identities are never passed here, hashed or otherwise.

/// Log an accepted report or automated-block event.
pub fn report_ingested(phone: &str, country: &str, category: &str) {
    tracing::info!(
        event = "report_ingested",
        phone = %phone,
        country = %country,
        category = %category,
        "report ingested"
    );
}

/// Log a persisted recomputation.
pub fn score_recomputed(phone: &str, score: f64, tier: &str, total_reports: u32) {
    tracing::info!(
        event = "score_recomputed",
        phone = %phone,
        score = score,
        tier = %tier,
        total_reports = total_reports,
        "score recomputed"
    );
}

/// Log a purge of a phone's aggregate.
pub fn score_purged(phone: &str, reason: &str) {
    tracing::info!(
        event = "score_purged",
        phone = %phone,
        reason = %reason,
        "score purged"
    );
}

/// Log the velocity override firing.
pub fn swarm_override_applied(phone: &str, velocity_hits: u32, raw_score: f64) {
    tracing::warn!(
        event = "swarm_override_applied",
        phone = %phone,
        velocity_hits = velocity_hits,
        raw_score = raw_score,
        "swarm override applied"
    );
}

/// Log a threat index write or retraction.
pub fn threat_reconciled(phone: &str, country: &str, action: &str) {
    tracing::debug!(
        event = "threat_reconciled",
        phone = %phone,
        country = %country,
        action = %action,
        "threat index reconciled"
    );
}

/// Log a TTL sweep.
pub fn expired_rows_swept(reports: usize, scores: usize, threats: usize) {
    tracing::info!(
        event = "expired_rows_swept",
        reports = reports,
        scores = scores,
        threats = threats,
        "expired rows swept"
    );
}
