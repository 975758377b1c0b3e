use chrono::{DateTime, Duration, SubsecRound, Utc};
use gsr_core::models::{Report, RiskCategory, RiskTier};
use gsr_scoring::factors::{consensus, temporal};
use gsr_scoring::{ScoringContext, ScoringEngine};
use proptest::prelude::*;

fn arb_category() -> impl Strategy<Value = RiskCategory> {
    prop_oneof![
        Just(RiskCategory::Spam),
        Just(RiskCategory::Fraud),
        Just(RiskCategory::Phishing),
        Just(RiskCategory::DebtCollection),
        Just(RiskCategory::Sales),
        Just(RiskCategory::AutoBlock),
    ]
}

/// (reporter index, category, age in hours; negative = future-dated)
fn arb_history() -> impl Strategy<Value = Vec<(u8, RiskCategory, i64)>> {
    prop::collection::vec((0u8..12, arb_category(), -48i64..20_000), 0..60)
}

fn build(now: DateTime<Utc>, entries: &[(u8, RiskCategory, i64)]) -> Vec<Report> {
    entries.iter()
        .map(|(who, cat, hours)| {
            Report::at("+56900000000", "CL", format!("r{who}"), *cat, "", now - Duration::hours(*hours))
        })
        .collect()
}

// ── Bounded 0 ≤ score ≤ 100, two decimals ───────────────────────────────

proptest! {
    #[test]
    fn final_score_is_bounded_and_rounded(entries in arb_history()) {
        let now = Utc::now().trunc_subsecs(6);
        let bd = ScoringEngine::new().calculate_breakdown(&build(now, &entries), &ScoringContext::at(now));
        prop_assert!(bd.final_score >= 0.0);
        prop_assert!(bd.final_score <= 100.0);
        prop_assert_eq!(bd.final_score, (bd.final_score * 100.0).round() / 100.0);
        prop_assert_eq!(bd.tier, RiskTier::from_score(bd.final_score));
    }
}

// ── Decay is monotonically non-increasing with age ──────────────────────

proptest! {
    #[test]
    fn decay_never_increases_with_age(a in 0.0f64..5_000.0, b in 0.0f64..5_000.0) {
        let (young, old) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(temporal::decay_factor(old, 110.0) <= temporal::decay_factor(young, 110.0));
        prop_assert!(temporal::decay_factor(old, 110.0) > 0.0);
    }
}

// ── More corroboration never lowers the consensus factor ────────────────

proptest! {
    #[test]
    fn consensus_is_monotonic(a in 0usize..50, b in 0usize..50) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(consensus::factor(lo) <= consensus::factor(hi));
    }
}

// ── Order of the history is irrelevant ──────────────────────────────────

proptest! {
    #[test]
    fn history_order_does_not_matter(entries in arb_history()) {
        let now = Utc::now().trunc_subsecs(6);
        let history = build(now, &entries);
        let mut reversed = history.clone();
        reversed.reverse();
        let engine = ScoringEngine::new();
        let ctx = ScoringContext::at(now);
        let a = engine.calculate_breakdown(&history, &ctx);
        let b = engine.calculate_breakdown(&reversed, &ctx);
        prop_assert_eq!(a.decayed_sum.to_bits(), b.decayed_sum.to_bits());
        prop_assert_eq!(a.final_score.to_bits(), b.final_score.to_bits());
        prop_assert_eq!(a.tier, b.tier);
        prop_assert_eq!(a.velocity_hits, b.velocity_hits);
        prop_assert_eq!(a.distinct_reporters, b.distinct_reporters);
        prop_assert_eq!(a.last_human_activity, b.last_human_activity);
    }
}

// ── Automated blocks never change the human-derived sum ─────────────────

proptest! {
    #[test]
    fn auto_blocks_do_not_feed_decayed_sum(entries in arb_history(), extra in 0usize..30) {
        let now = Utc::now().trunc_subsecs(6);
        let history = build(now, &entries);
        let mut padded = history.clone();
        padded.extend((0..extra).map(|i| {
            Report::at("+56900000000", "CL", format!("app{i}"), RiskCategory::AutoBlock, "", now)
        }));
        let engine = ScoringEngine::new();
        let ctx = ScoringContext::at(now);
        let a = engine.calculate_breakdown(&history, &ctx);
        let b = engine.calculate_breakdown(&padded, &ctx);
        prop_assert_eq!(a.decayed_sum, b.decayed_sum);
        prop_assert_eq!(a.distinct_reporters, b.distinct_reporters);
        prop_assert!(b.final_score >= a.final_score);
    }
}
