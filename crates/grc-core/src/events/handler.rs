use super::types::*;

/// Receives register events. Every method defaults to a no-op so handlers
/// implement only what they observe.
pub trait GrcEventHandler: Send + Sync {
    fn on_risk_created(&self, _event: &RiskCreatedEvent) {}
    fn on_risk_updated(&self, _event: &RiskUpdatedEvent) {}
    fn on_risk_deleted(&self, _event: &RiskDeletedEvent) {}
    fn on_control_assessed(&self, _event: &ControlAssessedEvent) {}
    fn on_auto_risk_synced(&self, _event: &AutoRiskSyncedEvent) {}
}
