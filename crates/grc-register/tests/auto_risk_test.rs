//! Recording controls and the auto-generated risks they raise.

use std::sync::Arc;

use grc_core::errors::GrcError;
use grc_core::models::*;
use grc_core::traits::IRegisterStorage;
use grc_register::{AutoRiskPolicy, RiskAction, RiskRegister};
use grc_storage::{InMemoryStorage, StorageEngine};

fn registers() -> Vec<RiskRegister> {
    let backends: Vec<Arc<dyn IRegisterStorage>> = vec![
        Arc::new(StorageEngine::open_in_memory().unwrap()),
        Arc::new(InMemoryStorage::new()),
    ];
    backends.into_iter().map(RiskRegister::new).collect()
}

fn failed_control(control_id: &str) -> NewControlAssessment {
    NewControlAssessment {
        control_id: Some(control_id.to_string()),
        category_name: Some("Identity Management and Access Control".to_string()),
        status: Some(ControlStatus::NotImplemented),
        response: Some("No MFA on remote access.".to_string()),
        ..Default::default()
    }
}

#[test]
fn failed_control_creates_one_risk() {
    for register in registers() {
        let recorded = register
            .record_control_assessment(1, failed_control("PR.AC-1"))
            .unwrap();
        assert_eq!(recorded.risk_action, RiskAction::Created);
        let risk = recorded.risk.unwrap();
        assert!(risk.auto_generated);
        assert_eq!(risk.assessment_id, Some(1));
        assert_eq!(risk.control_id.as_deref(), Some("PR.AC-1"));
        assert_eq!(risk.category, RiskCategory::Technology);
        assert_eq!((risk.likelihood, risk.impact, risk.risk_score), (3, 3, 9));
        assert_eq!(risk.risk_level, RiskLevel::Medium);
        assert_eq!(
            risk.description,
            "Control PR.AC-1 (Identity Management and Access Control) is not implemented: \
             No MFA on remote access."
        );
    }
}

#[test]
fn recording_the_same_failure_twice_yields_one_risk() {
    for register in registers() {
        let first = register
            .record_control_assessment(1, failed_control("PR.AC-1"))
            .unwrap();
        let mut again = failed_control("PR.AC-1");
        again.comments = Some("Vendor quote received".to_string());
        again.impact = Some(5);
        let second = register.record_control_assessment(1, again).unwrap();

        assert_eq!(second.risk_action, RiskAction::Refreshed);
        let (a, b) = (first.risk.unwrap(), second.risk.unwrap());
        assert_eq!(a.id, b.id);
        assert_eq!(b.impact, 5);
        assert_eq!(b.likelihood, 3);
        assert!(b.description.ends_with("Comments: Vendor quote received"));
        assert_eq!(first.control.id, second.control.id);

        let all = register.list(&RiskFilter::for_assessment(1)).unwrap();
        assert_eq!(all.len(), 1);
    }
}

#[test]
fn mitigated_risk_reopens_on_new_failure() {
    for register in registers() {
        let risk = register
            .record_control_assessment(2, failed_control("DE.CM-1"))
            .unwrap()
            .risk
            .unwrap();
        register
            .update(
                risk.id,
                &RiskPatch {
                    mitigation_status: Some(MitigationStatus::Mitigated),
                    owner: Some(Some("soc".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();

        let refreshed = register
            .record_control_assessment(2, failed_control("DE.CM-1"))
            .unwrap()
            .risk
            .unwrap();
        assert_eq!(refreshed.mitigation_status, MitigationStatus::Open);
        assert_eq!(refreshed.owner.as_deref(), Some("soc"));
    }
}

#[test]
fn compliant_status_leaves_risks_alone() {
    for register in registers() {
        register
            .record_control_assessment(3, failed_control("GV.OC-1"))
            .unwrap();
        let mut fixed = failed_control("GV.OC-1");
        fixed.status = Some(ControlStatus::Complete);
        let recorded = register.record_control_assessment(3, fixed).unwrap();

        assert_eq!(recorded.risk_action, RiskAction::None);
        assert!(recorded.risk.is_none());
        assert_eq!(recorded.control.status, ControlStatus::Complete);
        assert_eq!(register.list(&RiskFilter::for_assessment(3)).unwrap().len(), 1);
    }
}

#[test]
fn policy_and_category_mapping() {
    let register = RiskRegister::new(Arc::new(InMemoryStorage::new())).with_policy(AutoRiskPolicy {
        likelihood: 4,
        impact: 5,
    });
    for (control_id, category) in [
        ("GV.RM-1", RiskCategory::Strategic),
        ("ID.AM-1", RiskCategory::Operational),
        ("RS.MA-1", RiskCategory::Operational),
        ("RC.RP-1", RiskCategory::Operational),
        ("DE.AE-1", RiskCategory::Technology),
        ("QQ.XX-1", RiskCategory::Compliance),
    ] {
        let risk = register
            .record_control_assessment(4, failed_control(control_id))
            .unwrap()
            .risk
            .unwrap();
        assert_eq!(risk.category, category, "{control_id}");
        assert_eq!(risk.risk_level, RiskLevel::Critical);
    }
}

#[test]
fn control_link_cannot_change() {
    for register in registers() {
        let risk = register
            .record_control_assessment(5, failed_control("PR.DS-1"))
            .unwrap()
            .risk
            .unwrap();
        let patch: RiskPatch = serde_json::from_str(r#"{"control_id": null}"#).unwrap();
        assert!(matches!(
            register.update(risk.id, &patch),
            Err(GrcError::Conflict { .. })
        ));
        assert_eq!(
            register.get(risk.id).unwrap().control_id.as_deref(),
            Some("PR.DS-1")
        );
    }
}

#[test]
fn invalid_control_payloads_are_rejected() {
    for register in registers() {
        let missing_status = NewControlAssessment {
            control_id: Some("PR.AC-1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            register.record_control_assessment(1, missing_status),
            Err(GrcError::Validation(_))
        ));

        let mut bad_override = failed_control("PR.AC-1");
        bad_override.likelihood = Some(6);
        assert!(matches!(
            register.record_control_assessment(1, bad_override),
            Err(GrcError::Validation(_))
        ));
        assert!(register.list_control_assessments(1).unwrap().is_empty());
    }
}
