//! Audit trail: every register event as a structured log line on the
//! `grc::audit` target.

use grc_core::events::types::*;
use grc_core::events::GrcEventHandler;

pub const AUDIT_TARGET: &str = "grc::audit";

#[derive(Debug, Default)]
pub struct AuditLogHandler;

impl GrcEventHandler for AuditLogHandler {
    fn on_risk_created(&self, event: &RiskCreatedEvent) {
        tracing::info!(
            target: AUDIT_TARGET,
            id = event.id,
            risk_id = %event.risk_id,
            risk_level = %event.risk_level,
            auto_generated = event.auto_generated,
            "risk created"
        );
    }

    fn on_risk_updated(&self, event: &RiskUpdatedEvent) {
        tracing::info!(
            target: AUDIT_TARGET,
            id = event.id,
            risk_id = %event.risk_id,
            risk_level = %event.risk_level,
            mitigation_status = %event.mitigation_status,
            score_changed = event.score_changed,
            "risk updated"
        );
    }

    fn on_risk_deleted(&self, event: &RiskDeletedEvent) {
        tracing::info!(target: AUDIT_TARGET, id = event.id, "risk deleted");
    }

    fn on_control_assessed(&self, event: &ControlAssessedEvent) {
        tracing::info!(
            target: AUDIT_TARGET,
            assessment_id = event.assessment_id,
            control_id = %event.control_id,
            status = %event.status,
            "control assessed"
        );
    }

    fn on_auto_risk_synced(&self, event: &AutoRiskSyncedEvent) {
        tracing::info!(
            target: AUDIT_TARGET,
            assessment_id = event.assessment_id,
            control_id = %event.control_id,
            risk_id = %event.risk_id,
            action = ?event.action,
            "auto-generated risk synced"
        );
    }
}
