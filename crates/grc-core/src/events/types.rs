//! Event payload types.

use crate::models::{ControlStatus, MitigationStatus, RiskLevel};

/// Payload for `on_risk_created`.
#[derive(Debug, Clone)]
pub struct RiskCreatedEvent {
    pub id: i64,
    pub risk_id: String,
    pub risk_level: RiskLevel,
    pub auto_generated: bool,
}

/// Payload for `on_risk_updated`.
#[derive(Debug, Clone)]
pub struct RiskUpdatedEvent {
    pub id: i64,
    pub risk_id: String,
    pub risk_level: RiskLevel,
    pub mitigation_status: MitigationStatus,
    pub score_changed: bool,
}

/// Payload for `on_risk_deleted`.
#[derive(Debug, Clone)]
pub struct RiskDeletedEvent {
    pub id: i64,
}

/// Payload for `on_control_assessed`.
#[derive(Debug, Clone)]
pub struct ControlAssessedEvent {
    pub assessment_id: i64,
    pub control_id: String,
    pub status: ControlStatus,
}

/// Whether the auto-creation trigger inserted a risk or refreshed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRiskAction {
    Created,
    Refreshed,
}

/// Payload for `on_auto_risk_synced`.
#[derive(Debug, Clone)]
pub struct AutoRiskSyncedEvent {
    pub assessment_id: i64,
    pub control_id: String,
    pub risk_id: String,
    pub action: AutoRiskAction,
}
