//! InMemoryStorage: process-local `IRegisterStorage` for tests and
//! throwaway deployments. Same semantics as the SQLite backend.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use grc_core::constants::format_risk_id;
use grc_core::errors::{GrcResult, StorageError};
use grc_core::models::{
    ControlAssessment, ControlAssessmentDraft, Risk, RiskDraft, RiskFilter, RiskPatch,
    RiskStatistics,
};
use grc_core::traits::IRegisterStorage;

#[derive(Default)]
struct MemoryState {
    risks: BTreeMap<i64, Risk>,
    controls: BTreeMap<(i64, String), ControlAssessment>,
    last_risk_id: i64,
    last_control_id: i64,
}

impl MemoryState {
    /// Mirrors the SQLite partial unique index on auto-generated risks.
    fn check_auto_unique(&self, draft: &RiskDraft) -> Result<(), StorageError> {
        // NULLs never collide in a SQLite unique index.
        if !draft.auto_generated || draft.assessment_id.is_none() || draft.control_id.is_none() {
            return Ok(());
        }
        let clash = self.risks.values().any(|r| {
            r.auto_generated
                && r.assessment_id == draft.assessment_id
                && r.control_id == draft.control_id
        });
        if clash {
            return Err(StorageError::ConstraintViolation {
                message: format!(
                    "auto-generated risk already exists for assessment {:?} control {:?}",
                    draft.assessment_id, draft.control_id
                ),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryStorage {
    state: RwLock<MemoryState>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>, StorageError> {
        self.state.read().map_err(|_| StorageError::LockPoisoned {
            resource: "in-memory register",
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>, StorageError> {
        self.state.write().map_err(|_| StorageError::LockPoisoned {
            resource: "in-memory register",
        })
    }
}

impl IRegisterStorage for InMemoryStorage {
    fn create_risk(&self, draft: &RiskDraft) -> GrcResult<Risk> {
        let mut state = self.write()?;
        state.check_auto_unique(draft)?;
        state.last_risk_id += 1;
        let id = state.last_risk_id;
        let risk = draft.clone().into_risk(id, format_risk_id(id), Utc::now());
        state.risks.insert(id, risk.clone());
        Ok(risk)
    }

    fn get_risk(&self, id: i64) -> GrcResult<Option<Risk>> {
        Ok(self.read()?.risks.get(&id).cloned())
    }

    fn list_risks(&self, filter: &RiskFilter) -> GrcResult<Vec<Risk>> {
        let state = self.read()?;
        let mut risks: Vec<Risk> = state
            .risks
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        risks.sort_by(Risk::register_order);
        Ok(risks)
    }

    fn update_risk(&self, id: i64, patch: &RiskPatch) -> GrcResult<Option<Risk>> {
        let mut state = self.write()?;
        let Some(stored) = state.risks.get_mut(&id) else {
            return Ok(None);
        };
        // Patch a copy so a rejected patch leaves the stored row untouched.
        let mut updated = stored.clone();
        patch.apply_to(&mut updated, Utc::now())?;
        *stored = updated.clone();
        Ok(Some(updated))
    }

    fn delete_risk(&self, id: i64) -> GrcResult<bool> {
        Ok(self.write()?.risks.remove(&id).is_some())
    }

    fn find_control_risk(&self, assessment_id: i64, control_id: &str) -> GrcResult<Option<Risk>> {
        let state = self.read()?;
        Ok(state
            .risks
            .values()
            .find(|r| {
                r.auto_generated
                    && r.assessment_id == Some(assessment_id)
                    && r.control_id.as_deref() == Some(control_id)
            })
            .cloned())
    }

    fn risk_statistics(&self, assessment_id: Option<i64>) -> GrcResult<RiskStatistics> {
        let state = self.read()?;
        let filter = RiskFilter {
            assessment_id,
            ..Default::default()
        };
        Ok(RiskStatistics::from_risks(
            state.risks.values().filter(|r| filter.matches(r)),
        ))
    }

    fn upsert_control_assessment(
        &self,
        draft: &ControlAssessmentDraft,
    ) -> GrcResult<ControlAssessment> {
        let mut state = self.write()?;
        let now = Utc::now();
        let key = (draft.assessment_id, draft.control_id.clone());

        if let Some(existing) = state.controls.get_mut(&key) {
            if !draft.category_name.is_empty() {
                existing.category_name = draft.category_name.clone();
            }
            existing.status = draft.status;
            existing.response = draft.response.clone();
            existing.comments = draft.comments.clone();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        state.last_control_id += 1;
        let control = ControlAssessment {
            id: state.last_control_id,
            assessment_id: draft.assessment_id,
            control_id: draft.control_id.clone(),
            category_name: draft.category_name.clone(),
            status: draft.status,
            response: draft.response.clone(),
            comments: draft.comments.clone(),
            created_at: now,
            updated_at: now,
        };
        state.controls.insert(key, control.clone());
        Ok(control)
    }

    fn list_control_assessments(&self, assessment_id: i64) -> GrcResult<Vec<ControlAssessment>> {
        let state = self.read()?;
        Ok(state
            .controls
            .range((assessment_id, String::new())..)
            .take_while(|((a, _), _)| *a == assessment_id)
            .map(|(_, c)| c.clone())
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
