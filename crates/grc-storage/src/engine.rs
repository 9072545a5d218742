//! StorageEngine: SQLite implementation of `IRegisterStorage`.

use std::path::Path;

use chrono::Utc;
use grc_core::errors::GrcResult;
use grc_core::models::{
    ControlAssessment, ControlAssessmentDraft, Risk, RiskDraft, RiskFilter, RiskPatch,
    RiskStatistics,
};
use grc_core::traits::IRegisterStorage;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::{control_assessments, risks, statistics};

/// SQLite-backed register. Writes are serialized through one connection in
/// `BEGIN IMMEDIATE` transactions; reads use the pool when file-backed.
pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open (creating if needed) a database file and migrate it.
    pub fn open(path: &Path, read_pool_size: usize) -> GrcResult<Self> {
        let db = DatabaseManager::open(path, read_pool_size)?;
        tracing::info!(
            path = %path.display(),
            readers = db.reader_count(),
            "opened sqlite register"
        );
        Ok(Self { db })
    }

    /// Open a private in-memory database. All reads go through the writer.
    pub fn open_in_memory() -> GrcResult<Self> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }
}

impl IRegisterStorage for StorageEngine {
    fn create_risk(&self, draft: &RiskDraft) -> GrcResult<Risk> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| Ok(risks::insert_risk(tx, draft, Utc::now())?))
        })
    }

    fn get_risk(&self, id: i64) -> GrcResult<Option<Risk>> {
        self.db.with_reader(|conn| Ok(risks::get_risk(conn, id)?))
    }

    fn list_risks(&self, filter: &RiskFilter) -> GrcResult<Vec<Risk>> {
        self.db.with_reader(|conn| Ok(risks::list_risks(conn, filter)?))
    }

    fn update_risk(&self, id: i64, patch: &RiskPatch) -> GrcResult<Option<Risk>> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let Some(mut risk) = risks::get_risk(tx, id)? else {
                    return Ok(None);
                };
                patch.apply_to(&mut risk, Utc::now())?;
                risks::update_risk(tx, &risk)?;
                Ok(risks::get_risk(tx, id)?)
            })
        })
    }

    fn delete_risk(&self, id: i64) -> GrcResult<bool> {
        self.db.with_writer(|conn| Ok(risks::delete_risk(conn, id)?))
    }

    fn find_control_risk(&self, assessment_id: i64, control_id: &str) -> GrcResult<Option<Risk>> {
        self.db
            .with_reader(|conn| Ok(risks::find_control_risk(conn, assessment_id, control_id)?))
    }

    fn risk_statistics(&self, assessment_id: Option<i64>) -> GrcResult<RiskStatistics> {
        self.db
            .with_reader(|conn| Ok(statistics::risk_statistics(conn, assessment_id)?))
    }

    fn upsert_control_assessment(
        &self,
        draft: &ControlAssessmentDraft,
    ) -> GrcResult<ControlAssessment> {
        self.db.with_writer(|conn| {
            Ok(control_assessments::upsert_control_assessment(
                conn,
                draft,
                Utc::now(),
            )?)
        })
    }

    fn list_control_assessments(&self, assessment_id: i64) -> GrcResult<Vec<ControlAssessment>> {
        self.db.with_reader(|conn| {
            Ok(control_assessments::list_control_assessments(
                conn,
                assessment_id,
            )?)
        })
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
