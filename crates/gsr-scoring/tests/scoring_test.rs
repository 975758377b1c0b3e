use chrono::{DateTime, Duration, SubsecRound, Utc};
use gsr_core::models::{Report, RiskCategory, RiskTier};
use gsr_scoring::factors::{consensus, temporal, velocity};
use gsr_scoring::{ScoringContext, ScoringEngine, ScoringParams};

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn report(reporter: &str, category: RiskCategory, at: DateTime<Utc>) -> Report {
    Report::at("+56911111111", "CL", reporter, category, "", at)
}

// ── Decay model ──────────────────────────────────────────────────────────

#[test]
fn fresh_report_contributes_its_full_weight() {
    let now = now();
    let engine = ScoringEngine::new();
    let bd = engine.calculate_breakdown(
        &[report("a", RiskCategory::Phishing, now)],
        &ScoringContext::at(now),
    );
    assert!((bd.decayed_sum - 90.0).abs() < 1e-9);
}

#[test]
fn decay_at_180_days_matches_half_life_curve() {
    let f = temporal::decay_factor(180.0, 110.0);
    assert!((f - 0.5f64.powf(180.0 / 110.0)).abs() < 1e-12);
    assert!(f > 0.32 && f < 0.33, "got {f}");
}

#[test]
fn future_dated_report_counts_as_fresh_not_amplified() {
    let now = now();
    let engine = ScoringEngine::new();
    let bd = engine.calculate_breakdown(
        &[report("a", RiskCategory::Fraud, now + Duration::days(2))],
        &ScoringContext::at(now),
    );
    assert!((bd.decayed_sum - 100.0).abs() < 1e-9);
}

#[test]
fn very_old_report_is_tiny_but_not_zero() {
    let now = now();
    let engine = ScoringEngine::new();
    let bd = engine.calculate_breakdown(
        &[report("a", RiskCategory::Fraud, now - Duration::days(3_000))],
        &ScoringContext::at(now),
    );
    assert!(bd.decayed_sum > 0.0);
    assert!(bd.decayed_sum < 1e-5);
    assert_eq!(bd.final_score, 0.0);
}

#[test]
fn half_life_is_configurable() {
    let now = now();
    let engine = ScoringEngine::with_params(ScoringParams {
        half_life_days: 10.0,
        ..ScoringParams::default()
    });
    let bd = engine.calculate_breakdown(
        &[report("a", RiskCategory::Fraud, now - Duration::days(10))],
        &ScoringContext::at(now),
    );
    assert!((bd.decayed_sum - 50.0).abs() < 1e-6);
}

// ── Consensus weighter ───────────────────────────────────────────────────

#[test]
fn consensus_schedule_matches_steps() {
    let expected = [(0, 0.0), (1, 0.10), (2, 0.20), (3, 0.30), (4, 0.50), (5, 0.70), (6, 1.0), (40, 1.0)];
    for (n, f) in expected {
        assert_eq!(consensus::factor(n), f, "reporters = {n}");
    }
}

#[test]
fn repeat_reports_from_one_reporter_do_not_buy_consensus() {
    let now = now();
    let history: Vec<Report> = (0..5)
        .map(|_| report("grudge", RiskCategory::Fraud, now))
        .collect();
    let bd = ScoringEngine::new().calculate_breakdown(&history, &ScoringContext::at(now));
    assert_eq!(bd.distinct_reporters, 1);
    assert_eq!(bd.consensus_factor, 0.10);
    assert!((bd.final_score - 50.0).abs() < 1e-9);
}

#[test]
fn automated_blocks_never_count_as_reporters() {
    let now = now();
    let history = vec![
        report("human", RiskCategory::Spam, now),
        report("app_1", RiskCategory::AutoBlock, now),
        report("app_2", RiskCategory::AutoBlock, now),
    ];
    assert_eq!(consensus::distinct_reporters(&history), 1);
    let bd = ScoringEngine::new().calculate_breakdown(&history, &ScoringContext::at(now));
    assert_eq!(bd.human_reports, 1);
    assert!((bd.decayed_sum - 20.0).abs() < 1e-9);
}

#[test]
fn only_automated_blocks_scores_zero_without_override() {
    let now = now();
    let history: Vec<Report> = (0..3)
        .map(|i| report(&format!("app_{i}"), RiskCategory::AutoBlock, now))
        .collect();
    let bd = ScoringEngine::new().calculate_breakdown(&history, &ScoringContext::at(now));
    assert_eq!(bd.decayed_sum, 0.0);
    assert_eq!(bd.final_score, 0.0);
    assert!(bd.last_human_activity.is_none());
    assert!(bd.effective_last_activity.is_none());
}

// ── Swarm heuristic ──────────────────────────────────────────────────────

#[test]
fn velocity_counts_only_recent_automated_blocks() {
    let now = now();
    let history = vec![
        report("app_1", RiskCategory::AutoBlock, now - Duration::days(1)),
        report("app_2", RiskCategory::AutoBlock, now - Duration::days(6)),
        report("app_3", RiskCategory::AutoBlock, now - Duration::days(7)),
        report("app_4", RiskCategory::AutoBlock, now - Duration::days(30)),
        report("human", RiskCategory::Fraud, now),
    ];
    assert_eq!(velocity::count_hits(&history, now, 7), 2);
}

#[test]
fn swarm_with_no_human_reports_reaches_the_floor() {
    let now = now();
    let history: Vec<Report> = (0..11)
        .map(|i| report(&format!("app_{i}"), RiskCategory::AutoBlock, now - Duration::hours(i)))
        .collect();
    let bd = ScoringEngine::new().calculate_breakdown(&history, &ScoringContext::at(now));
    assert!(bd.swarm_override);
    assert_eq!(bd.final_score, 25.0);
    assert_eq!(bd.tier, RiskTier::Warning);
    assert_eq!(bd.effective_last_activity, Some(now));
}

#[test]
fn swarm_floor_never_lowers_a_higher_human_score() {
    let now = now();
    let mut history: Vec<Report> = ["a", "b", "c"]
        .iter()
        .map(|r| report(r, RiskCategory::Fraud, now))
        .collect();
    history.extend((0..15).map(|i| report(&format!("app_{i}"), RiskCategory::AutoBlock, now)));
    let bd = ScoringEngine::new().calculate_breakdown(&history, &ScoringContext::at(now));
    assert!(bd.swarm_override);
    assert!((bd.final_score - 90.0).abs() < 1e-9);
    assert_eq!(bd.tier, RiskTier::Critical);
}

// ── Score assembly ───────────────────────────────────────────────────────

#[test]
fn score_is_capped_at_one_hundred() {
    let now = now();
    let history: Vec<Report> = (0..10)
        .map(|i| report(&format!("r{i}"), RiskCategory::Fraud, now))
        .collect();
    let bd = ScoringEngine::new().calculate_breakdown(&history, &ScoringContext::at(now));
    assert!(bd.raw_score > 100.0);
    assert_eq!(bd.final_score, 100.0);
}

#[test]
fn final_score_is_rounded_to_two_decimals() {
    let now = now();
    let history = vec![
        report("a", RiskCategory::Spam, now - Duration::days(13)),
        report("b", RiskCategory::DebtCollection, now - Duration::days(41)),
    ];
    let bd = ScoringEngine::new().calculate_breakdown(&history, &ScoringContext::at(now));
    assert_eq!(bd.final_score, (bd.final_score * 100.0).round() / 100.0);
}

#[test]
fn last_activity_is_newest_human_report_regardless_of_order() {
    let now = now();
    let newest = now - Duration::days(2);
    let history = vec![
        report("a", RiskCategory::Fraud, now - Duration::days(50)),
        report("b", RiskCategory::Fraud, newest),
        report("c", RiskCategory::Fraud, now - Duration::days(9)),
        report("app", RiskCategory::AutoBlock, now),
    ];
    let mut reversed = history.clone();
    reversed.reverse();

    let engine = ScoringEngine::new();
    let ctx = ScoringContext::at(now);
    let a = engine.calculate_breakdown(&history, &ctx);
    let b = engine.calculate_breakdown(&reversed, &ctx);
    assert_eq!(a.last_human_activity, Some(newest));
    assert_eq!(a.final_score, b.final_score);
    assert_eq!(a.last_human_activity, b.last_human_activity);
}
