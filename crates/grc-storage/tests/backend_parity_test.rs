//! Both backends must agree on scores, levels, filters, ordering and statistics.

use std::sync::Arc;

use grc_core::config::StorageConfig;
use grc_core::errors::GrcError;
use grc_core::models::*;
use grc_core::traits::IRegisterStorage;
use grc_storage::{open_backend, InMemoryStorage, StorageEngine};

fn backends() -> Vec<Arc<dyn IRegisterStorage>> {
    vec![
        Arc::new(StorageEngine::open_in_memory().unwrap()),
        Arc::new(InMemoryStorage::new()),
    ]
}

fn seed(storage: &dyn IRegisterStorage) {
    for (description, likelihood, impact, assessment_id) in [
        ("Unpatched servers", 4, 5, Some(1)),
        ("Shared admin account", 3, 4, Some(1)),
        ("No DR test", 2, 3, Some(2)),
        ("Legacy VPN", 1, 2, None),
        ("Vendor access", 4, 3, None),
    ] {
        let draft = NewRisk {
            likelihood: Some(likelihood),
            impact: Some(impact),
            assessment_id,
            ..NewRisk::with_description(description)
        }
        .into_draft()
        .unwrap();
        storage.create_risk(&draft).unwrap();
    }
}

fn summary(risks: &[Risk]) -> Vec<(String, String, u8, RiskLevel)> {
    risks
        .iter()
        .map(|r| (r.risk_id.clone(), r.description.clone(), r.risk_score, r.risk_level))
        .collect()
}

#[test]
fn backends_agree_on_listing_and_statistics() {
    let [sqlite, memory]: [Arc<dyn IRegisterStorage>; 2] = backends().try_into().ok().unwrap();
    seed(sqlite.as_ref());
    seed(memory.as_ref());

    let filters = [
        RiskFilter::default(),
        RiskFilter::for_assessment(1),
        RiskFilter {
            risk_level: Some(RiskLevel::High),
            ..Default::default()
        },
        RiskFilter {
            risk_level: Some(RiskLevel::High),
            mitigation_status: Some(MitigationStatus::Open),
            ..Default::default()
        },
    ];
    for filter in filters {
        assert_eq!(
            summary(&sqlite.list_risks(&filter).unwrap()),
            summary(&memory.list_risks(&filter).unwrap()),
            "{filter:?}"
        );
    }

    for scope in [None, Some(1), Some(2), Some(99)] {
        assert_eq!(
            sqlite.risk_statistics(scope).unwrap(),
            memory.risk_statistics(scope).unwrap()
        );
    }
}

#[test]
fn update_recomputes_on_both_backends() {
    for storage in backends() {
        let created = storage
            .create_risk(&NewRisk::with_description("Unpatched servers").into_draft().unwrap())
            .unwrap();
        assert_eq!(created.risk_level, RiskLevel::Medium);

        let patch: RiskPatch = serde_json::from_str(
            r#"{"likelihood": 4, "impact": 5, "residual_likelihood": 2, "residual_impact": 2, "owner": "ops"}"#,
        )
        .unwrap();
        let updated = storage.update_risk(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.risk_score, 20, "{}", storage.backend_name());
        assert_eq!(updated.risk_level, RiskLevel::Critical);
        assert_eq!(updated.residual_score, Some(4));
        assert_eq!(updated.residual_level, Some(RiskLevel::Low));
        assert_eq!(updated.owner.as_deref(), Some("ops"));

        assert!(storage.update_risk(9999, &patch).unwrap().is_none());
    }
}

#[test]
fn rejected_patch_leaves_row_untouched() {
    for storage in backends() {
        let created = storage
            .create_risk(&NewRisk::with_description("x").into_draft().unwrap())
            .unwrap();
        let patch = RiskPatch {
            likelihood: Some(2),
            impact: Some(0),
            ..Default::default()
        };
        let err = storage.update_risk(created.id, &patch).unwrap_err();
        assert!(matches!(err, GrcError::Validation(_)));
        let stored = storage.get_risk(created.id).unwrap().unwrap();
        assert_eq!(stored.likelihood, 3);
        assert_eq!(stored.impact, 3);
    }
}

#[test]
fn delete_missing_is_false_on_both_backends() {
    for storage in backends() {
        assert!(!storage.delete_risk(404).unwrap());
    }
}

#[test]
fn controls_upsert_on_both_backends() {
    for storage in backends() {
        let mut draft = ControlAssessmentDraft {
            assessment_id: 3,
            control_id: "ID.AM-1".to_string(),
            category_name: "Asset Management".to_string(),
            status: ControlStatus::NotStarted,
            response: None,
            comments: None,
        };
        storage.upsert_control_assessment(&draft).unwrap();
        draft.control_id = "GV.OC-1".to_string();
        storage.upsert_control_assessment(&draft).unwrap();
        draft.status = ControlStatus::Complete;
        storage.upsert_control_assessment(&draft).unwrap();

        let controls = storage.list_control_assessments(3).unwrap();
        let ids: Vec<&str> = controls.iter().map(|c| c.control_id.as_str()).collect();
        assert_eq!(ids, vec!["GV.OC-1", "ID.AM-1"], "{}", storage.backend_name());
        assert_eq!(controls[0].status, ControlStatus::Complete);
    }
}

#[test]
fn auto_generated_duplicate_rejected_on_both_backends() {
    for storage in backends() {
        let mut draft = NewRisk {
            assessment_id: Some(5),
            control_id: Some("RS.MA-1".to_string()),
            ..NewRisk::with_description("gap")
        }
        .into_draft()
        .unwrap();
        draft.auto_generated = true;
        storage.create_risk(&draft).unwrap();
        let err = storage.create_risk(&draft).unwrap_err();
        assert!(err.is_client_error(), "{}", storage.backend_name());
        assert!(storage.find_control_risk(5, "RS.MA-1").unwrap().is_some());
        assert!(storage.find_control_risk(5, "RS.MA-2").unwrap().is_none());
    }
}

#[test]
fn file_backed_engine_reads_through_pool() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = StorageConfig {
        db_path: Some(dir.path().join("grc.db").display().to_string()),
        read_pool_size: Some(2),
        ..Default::default()
    };
    let storage = open_backend(&config).unwrap();
    assert_eq!(storage.backend_name(), "sqlite");

    let created = storage
        .create_risk(&NewRisk::with_description("persisted").into_draft().unwrap())
        .unwrap();
    let fetched = storage.get_risk(created.id).unwrap().unwrap();
    assert_eq!(fetched.risk_id, "RISK-0001");
    drop(storage);

    // Reopen: data and schema survive.
    let reopened = open_backend(&config).unwrap();
    assert_eq!(reopened.list_risks(&RiskFilter::default()).unwrap().len(), 1);
}

#[test]
fn memory_backend_from_config() {
    let config = StorageConfig {
        backend: Some(grc_core::config::StorageBackend::Memory),
        ..Default::default()
    };
    assert_eq!(open_backend(&config).unwrap().backend_name(), "memory");
}

#[test]
fn file_backed_engine_uses_wal_and_checkpoints() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("wal.db");
    let engine = StorageEngine::open(&path, 3).unwrap();
    let db = engine.database();
    assert_eq!(db.reader_count(), 3);
    assert_eq!(db.path(), Some(path.as_path()));

    let wal = db
        .with_writer(|conn| grc_storage::connection::pragmas::verify_wal_mode(conn))
        .unwrap();
    assert!(wal);

    engine
        .create_risk(&NewRisk::with_description("x").into_draft().unwrap())
        .unwrap();
    db.checkpoint().unwrap();
    assert_eq!(engine.list_risks(&RiskFilter::default()).unwrap().len(), 1);

    let memory = StorageEngine::open_in_memory().unwrap();
    assert_eq!(memory.database().reader_count(), 0);
    assert!(memory.database().path().is_none());
}
