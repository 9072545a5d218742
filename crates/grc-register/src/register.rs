//! RiskRegister: validation, CRUD orchestration and events over a storage
//! backend.

use std::sync::Arc;

use chrono::Utc;
use grc_core::config::GrcConfig;
use grc_core::constants::DEFAULT_EXPORT_PREFIX;
use grc_core::errors::{GrcError, GrcResult};
use grc_core::events::types::{RiskCreatedEvent, RiskDeletedEvent, RiskUpdatedEvent};
use grc_core::events::EventDispatcher;
use grc_core::models::{NewRisk, Risk, RiskFilter, RiskPatch, RiskStatistics};
use grc_core::traits::IRegisterStorage;

use crate::auto_risk::AutoRiskPolicy;
use crate::export::{export_filename, CsvExport, CsvExporter};
use crate::report::ComplianceReport;

/// Entry point for every register operation. Cheap to share behind an `Arc`.
pub struct RiskRegister {
    storage: Arc<dyn IRegisterStorage>,
    events: Arc<EventDispatcher>,
    policy: AutoRiskPolicy,
    export_prefix: String,
}

impl RiskRegister {
    /// Register with default policy, default export prefix and no event handlers.
    pub fn new(storage: Arc<dyn IRegisterStorage>) -> Self {
        Self {
            storage,
            events: Arc::new(EventDispatcher::new()),
            policy: AutoRiskPolicy::default(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }

    pub fn from_config(
        storage: Arc<dyn IRegisterStorage>,
        events: Arc<EventDispatcher>,
        config: &GrcConfig,
    ) -> Self {
        Self {
            storage,
            events,
            policy: AutoRiskPolicy::from_config(&config.scoring),
            export_prefix: config.export.effective_filename_prefix().to_string(),
        }
    }

    pub fn with_events(mut self, events: Arc<EventDispatcher>) -> Self {
        self.events = events;
        self
    }

    pub fn with_policy(mut self, policy: AutoRiskPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn storage(&self) -> &Arc<dyn IRegisterStorage> {
        &self.storage
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn policy(&self) -> &AutoRiskPolicy {
        &self.policy
    }

    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }

    // --- Risks ---

    pub fn create(&self, input: NewRisk) -> GrcResult<Risk> {
        let draft = input.into_draft()?;
        let risk = self.storage.create_risk(&draft)?;
        tracing::info!(
            risk_id = %risk.risk_id,
            risk_score = risk.risk_score,
            risk_level = %risk.risk_level,
            "risk created"
        );
        self.emit_created(&risk);
        Ok(risk)
    }

    pub fn get(&self, id: i64) -> GrcResult<Risk> {
        self.storage
            .get_risk(id)?
            .ok_or_else(|| GrcError::not_found("risk", id))
    }

    pub fn list(&self, filter: &RiskFilter) -> GrcResult<Vec<Risk>> {
        self.storage.list_risks(filter)
    }

    /// Partial update. Score and level are re-derived when factors change.
    pub fn update(&self, id: i64, patch: &RiskPatch) -> GrcResult<Risk> {
        let risk = self
            .storage
            .update_risk(id, patch)?
            .ok_or_else(|| GrcError::not_found("risk", id))?;
        tracing::info!(
            risk_id = %risk.risk_id,
            risk_score = risk.risk_score,
            risk_level = %risk.risk_level,
            mitigation_status = %risk.mitigation_status,
            "risk updated"
        );
        self.emit_updated(&risk, patch.touches_score());
        Ok(risk)
    }

    pub fn delete(&self, id: i64) -> GrcResult<()> {
        if !self.storage.delete_risk(id)? {
            return Err(GrcError::not_found("risk", id));
        }
        tracing::info!(id, "risk deleted");
        self.events.emit_risk_deleted(&RiskDeletedEvent { id });
        Ok(())
    }

    pub fn statistics(&self, assessment_id: Option<i64>) -> GrcResult<RiskStatistics> {
        self.storage.risk_statistics(assessment_id)
    }

    // --- Export ---

    /// The filtered register as CSV, in list order.
    pub fn export_csv(&self, filter: &RiskFilter) -> GrcResult<CsvExport> {
        let risks = self.storage.list_risks(filter)?;
        let content = CsvExporter::new().export(&risks)?;
        let filename = export_filename(&self.export_prefix, Utc::now());
        tracing::info!(rows = risks.len(), %filename, "register exported");
        Ok(CsvExport {
            filename,
            content,
            rows: risks.len(),
        })
    }

    // --- Reporting ---

    pub fn compliance_report(&self, assessment_id: i64) -> GrcResult<ComplianceReport> {
        let controls = self.storage.list_control_assessments(assessment_id)?;
        let risks = self
            .storage
            .list_risks(&RiskFilter::for_assessment(assessment_id))?;
        Ok(ComplianceReport::build(
            assessment_id,
            &controls,
            &risks,
            Utc::now(),
        ))
    }

    pub(crate) fn emit_created(&self, risk: &Risk) {
        self.events.emit_risk_created(&RiskCreatedEvent {
            id: risk.id,
            risk_id: risk.risk_id.clone(),
            risk_level: risk.risk_level,
            auto_generated: risk.auto_generated,
        });
    }

    pub(crate) fn emit_updated(&self, risk: &Risk, score_changed: bool) {
        self.events.emit_risk_updated(&RiskUpdatedEvent {
            id: risk.id,
            risk_id: risk.risk_id.clone(),
            risk_level: risk.risk_level,
            mitigation_status: risk.mitigation_status,
            score_changed,
        });
    }
}
