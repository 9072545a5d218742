//! RiskRegister behaviour over both storage backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use grc_core::errors::GrcError;
use grc_core::events::types::*;
use grc_core::events::{EventDispatcher, GrcEventHandler};
use grc_core::models::*;
use grc_core::traits::IRegisterStorage;
use grc_register::RiskRegister;
use grc_storage::{InMemoryStorage, StorageEngine};

fn backends() -> Vec<Arc<dyn IRegisterStorage>> {
    vec![
        Arc::new(StorageEngine::open_in_memory().unwrap()),
        Arc::new(InMemoryStorage::new()),
    ]
}

fn new_risk(description: &str, likelihood: i64, impact: i64) -> NewRisk {
    NewRisk {
        likelihood: Some(likelihood),
        impact: Some(impact),
        ..NewRisk::with_description(description)
    }
}

#[derive(Default)]
struct Recorder {
    created: AtomicUsize,
    updated: AtomicUsize,
    deleted: AtomicUsize,
}

impl GrcEventHandler for Recorder {
    fn on_risk_created(&self, _event: &RiskCreatedEvent) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    fn on_risk_updated(&self, _event: &RiskUpdatedEvent) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }

    fn on_risk_deleted(&self, _event: &RiskDeletedEvent) {
        self.deleted.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn unpatched_servers_lifecycle() {
    for storage in backends() {
        let register = RiskRegister::new(storage);
        let risk = register
            .create(new_risk("Unpatched servers", 4, 5))
            .unwrap();
        assert_eq!(risk.risk_score, 20);
        assert_eq!(risk.risk_level, RiskLevel::Critical);

        let patch: RiskPatch =
            serde_json::from_str(r#"{"residual_likelihood": 2, "residual_impact": 2}"#).unwrap();
        let updated = register.update(risk.id, &patch).unwrap();
        assert_eq!(updated.residual_score, Some(4));
        assert_eq!(updated.residual_level, Some(RiskLevel::Low));
        assert_eq!(updated.risk_score, 20);
    }
}

#[test]
fn description_only_create_uses_defaults() {
    for storage in backends() {
        let register = RiskRegister::new(storage);
        let risk = register
            .create(NewRisk::with_description("Shared admin password"))
            .unwrap();
        assert_eq!(risk.risk_id, "RISK-0001");
        assert_eq!(risk.mitigation_status, MitigationStatus::Open);
        assert_eq!((risk.likelihood, risk.impact), (3, 3));
        assert_eq!(risk.risk_level, RiskLevel::Medium);
        assert_eq!(risk.category, RiskCategory::Compliance);
    }
}

#[test]
fn empty_description_is_rejected_before_storage() {
    for storage in backends() {
        let register = RiskRegister::new(storage.clone());
        let err = register.create(NewRisk::with_description("  ")).unwrap_err();
        assert!(matches!(err, GrcError::Validation(_)));
        assert!(storage.list_risks(&RiskFilter::default()).unwrap().is_empty());
    }
}

#[test]
fn owner_update_keeps_score() {
    for storage in backends() {
        let register = RiskRegister::new(storage);
        let risk = register.create(new_risk("x", 2, 4)).unwrap();
        let patch: RiskPatch = serde_json::from_str(r#"{"owner": "it-ops"}"#).unwrap();
        let updated = register.update(risk.id, &patch).unwrap();
        assert_eq!(updated.risk_score, risk.risk_score);
        assert_eq!(updated.risk_level, risk.risk_level);
        assert_eq!(updated.owner.as_deref(), Some("it-ops"));
    }
}

#[test]
fn missing_ids_are_not_found() {
    for storage in backends() {
        let register = RiskRegister::new(storage);
        assert!(matches!(register.get(77), Err(GrcError::NotFound { .. })));
        assert!(matches!(register.delete(77), Err(GrcError::NotFound { .. })));
        assert!(matches!(
            register.update(77, &RiskPatch::default()),
            Err(GrcError::NotFound { .. })
        ));
    }
}

#[test]
fn statistics_for_three_levels() {
    for storage in backends() {
        let register = RiskRegister::new(storage);
        for (d, l, i) in [("low", 1, 2), ("high", 2, 5), ("critical", 5, 4)] {
            register
                .create(NewRisk {
                    assessment_id: Some(9),
                    ..new_risk(d, l, i)
                })
                .unwrap();
        }
        register.create(new_risk("other assessment", 5, 5)).unwrap();

        let stats = register.statistics(Some(9)).unwrap();
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["total_risks"], 3);
        assert_eq!(
            json["by_level"],
            serde_json::json!({"low": 1, "medium": 0, "high": 1, "critical": 1})
        );
        assert_eq!(register.statistics(None).unwrap().total_risks, 4);
    }
}

#[test]
fn events_follow_mutations() {
    let recorder = Arc::new(Recorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(recorder.clone());

    let register =
        RiskRegister::new(Arc::new(InMemoryStorage::new())).with_events(Arc::new(dispatcher));
    let risk = register.create(NewRisk::with_description("x")).unwrap();
    register
        .update(risk.id, &serde_json::from_str(r#"{"impact": 5}"#).unwrap())
        .unwrap();
    register.delete(risk.id).unwrap();

    assert_eq!(recorder.created.load(Ordering::Relaxed), 1);
    assert_eq!(recorder.updated.load(Ordering::Relaxed), 1);
    assert_eq!(recorder.deleted.load(Ordering::Relaxed), 1);
}
