//! Tests for the risk and control models.

use chrono::Utc;
use grc_core::models::*;

fn risk_with(id: i64, likelihood: i64, impact: i64, status: MitigationStatus) -> Risk {
    NewRisk {
        likelihood: Some(likelihood),
        impact: Some(impact),
        mitigation_status: Some(status),
        ..NewRisk::with_description(format!("risk {id}"))
    }
    .into_draft()
    .unwrap()
    .into_risk(id, grc_core::constants::format_risk_id(id), Utc::now())
}

#[test]
fn test_create_payload_decodes_case_insensitive_enums() {
    let input: NewRisk = serde_json::from_str(
        r#"{"description": "Unpatched servers", "category": "technology", "likelihood": 4, "impact": 5,
            "mitigation_status": "in_progress", "target_date": "2026-03-31"}"#,
    )
    .unwrap();
    let risk = input.into_draft().unwrap().into_risk(1, "RISK-0001".into(), Utc::now());
    assert_eq!(risk.category, RiskCategory::Technology);
    assert_eq!(risk.risk_score, 20);
    assert_eq!(risk.risk_level, RiskLevel::Critical);
    assert_eq!(risk.target_date.unwrap().to_string(), "2026-03-31");
}

#[test]
fn test_out_of_range_factor_is_validation_error() {
    let input = NewRisk {
        likelihood: Some(0),
        ..NewRisk::with_description("x")
    };
    assert!(matches!(
        input.into_draft(),
        Err(grc_core::errors::ValidationError::OutOfRange { field: "likelihood", .. })
    ));
}

#[test]
fn test_patch_recomputes_score_only_for_factors() {
    let mut risk = risk_with(1, 2, 2, MitigationStatus::Open);
    let owner_only: RiskPatch = serde_json::from_str(r#"{"owner": "ciso"}"#).unwrap();
    assert!(!owner_only.touches_score());
    owner_only.apply_to(&mut risk, Utc::now()).unwrap();
    assert_eq!(risk.risk_score, 4);
    assert_eq!(risk.risk_level, RiskLevel::Low);

    let factors: RiskPatch = serde_json::from_str(r#"{"likelihood": 5, "impact": 4}"#).unwrap();
    assert!(factors.touches_score());
    factors.apply_to(&mut risk, Utc::now()).unwrap();
    assert_eq!(risk.risk_score, 20);
    assert_eq!(risk.risk_level, RiskLevel::Critical);
}

#[test]
fn test_residual_appears_only_with_both_factors() {
    let mut risk = risk_with(1, 4, 5, MitigationStatus::InProgress);
    let half: RiskPatch = serde_json::from_str(r#"{"residual_likelihood": 2}"#).unwrap();
    half.apply_to(&mut risk, Utc::now()).unwrap();
    assert!(risk.residual_score.is_none());
    assert!(risk.residual_level.is_none());

    let full: RiskPatch = serde_json::from_str(r#"{"residual_impact": 2}"#).unwrap();
    full.apply_to(&mut risk, Utc::now()).unwrap();
    assert_eq!(risk.residual_score, Some(4));
    assert_eq!(risk.residual_level, Some(RiskLevel::Low));

    let cleared: RiskPatch = serde_json::from_str(r#"{"residual_impact": null}"#).unwrap();
    cleared.apply_to(&mut risk, Utc::now()).unwrap();
    assert!(risk.residual_score.is_none());
}

#[test]
fn test_filter_combines_with_and() {
    let risks = [
        risk_with(1, 1, 2, MitigationStatus::Open),
        risk_with(2, 3, 4, MitigationStatus::Open),
        risk_with(3, 3, 4, MitigationStatus::Mitigated),
        risk_with(4, 5, 5, MitigationStatus::Open),
    ];
    let filter = RiskFilter {
        risk_level: Some("high".parse().unwrap()),
        mitigation_status: Some("open".parse().unwrap()),
        ..Default::default()
    };
    let matched: Vec<i64> = risks.iter().filter(|r| filter.matches(r)).map(|r| r.id).collect();
    assert_eq!(matched, vec![2]);
    assert!(RiskFilter::default().is_empty());
    assert!(risks.iter().all(|r| RiskFilter::default().matches(r)));
}

#[test]
fn test_statistics_from_three_levels() {
    let risks = [
        risk_with(1, 1, 1, MitigationStatus::Open),
        risk_with(2, 3, 4, MitigationStatus::Mitigated),
        risk_with(3, 5, 5, MitigationStatus::Accepted),
    ];
    let stats = RiskStatistics::from_risks(&risks);
    assert_eq!(stats.total_risks, 3);
    assert_eq!(
        stats.by_level,
        LevelCounts {
            low: 1,
            medium: 0,
            high: 1,
            critical: 1
        }
    );
    assert_eq!(stats.by_status.not_started, 1);
    assert_eq!(stats.by_status.completed, 1);
    assert_eq!(stats.by_status.deferred, 1);

    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["by_level"]["critical"], 1);
}

#[test]
fn test_register_order_is_score_then_id() {
    let mut risks = vec![
        risk_with(1, 1, 1, MitigationStatus::Open),
        risk_with(2, 5, 5, MitigationStatus::Open),
        risk_with(3, 5, 5, MitigationStatus::Open),
    ];
    risks.sort_by(Risk::register_order);
    let ids: Vec<i64> = risks.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn test_risk_serializes_level_names() {
    let risk = risk_with(7, 4, 5, MitigationStatus::InProgress);
    let json = serde_json::to_value(&risk).unwrap();
    assert_eq!(json["risk_id"], "RISK-0007");
    assert_eq!(json["risk_level"], "Critical");
    assert_eq!(json["mitigation_status"], "in_progress");
    assert!(json["residual_score"].is_null());
}

#[test]
fn test_control_draft_and_function() {
    let input: NewControlAssessment = serde_json::from_str(
        r#"{"control_id": " rs.ma-01 ", "category_name": "Incident Management", "status": "not_implemented", "impact": 4}"#,
    )
    .unwrap();
    let (draft, overrides) = input.into_draft(11).unwrap();
    assert_eq!(draft.control_id, "rs.ma-01");
    assert_eq!(draft.assessment_id, 11);
    assert_eq!(overrides, RiskOverrides { likelihood: None, impact: Some(4) });
    assert_eq!(function_code_of(&draft.control_id), "RS");
    assert_eq!(CsfFunction::from_code("rs"), Some(CsfFunction::Respond));
    assert_eq!(CsfFunction::from_code("XX"), None);
}
