//! Property tests for the scoring model.

use grc_core::constants::format_risk_id;
use grc_core::models::RiskLevel;
use grc_core::scoring::{assess, assess_residual, risk_level, risk_score, validate_factor};
use proptest::prelude::*;

proptest! {
    #[test]
    fn score_is_product_of_factors(l in 1u8..=5, i in 1u8..=5) {
        let score = risk_score(l, i);
        prop_assert_eq!(score, l * i);
        prop_assert!((1..=25).contains(&score));
    }

    #[test]
    fn level_is_monotonic(a in 1u8..=25, b in 1u8..=25) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(risk_level(lo) <= risk_level(hi));
    }

    #[test]
    fn assess_agrees_with_parts(l in 1u8..=5, i in 1u8..=5) {
        let a = assess(l, i);
        prop_assert_eq!(a.score, risk_score(l, i));
        prop_assert_eq!(a.level, risk_level(a.score));
    }

    #[test]
    fn out_of_range_factors_rejected(v in prop_oneof![i64::MIN..1i64, 6i64..i64::MAX]) {
        prop_assert!(validate_factor("likelihood", v).is_err());
    }
}

#[test]
fn unpatched_servers_scenario() {
    let initial = assess(4, 5);
    assert_eq!(initial.score, 20);
    assert_eq!(initial.level, RiskLevel::Critical);

    let residual = assess_residual(Some(2), Some(2)).unwrap();
    assert_eq!(residual.score, 4);
    assert_eq!(residual.level, RiskLevel::Low);
}

#[test]
fn every_level_is_reachable() {
    let mut seen: Vec<RiskLevel> = (1..=5u8)
        .flat_map(|l| (1..=5u8).map(move |i| assess(l, i).level))
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen, RiskLevel::ALL.to_vec());
}

#[test]
fn risk_ids_are_zero_padded() {
    assert_eq!(format_risk_id(1), "RISK-0001");
    assert_eq!(format_risk_id(42), "RISK-0042");
    assert_eq!(format_risk_id(12345), "RISK-12345");
}
