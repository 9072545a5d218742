//! Recording control assessments and the auto-risk trigger.

use grc_core::errors::GrcResult;
use grc_core::events::types::{AutoRiskAction, AutoRiskSyncedEvent, ControlAssessedEvent};
use grc_core::models::{ControlAssessment, NewControlAssessment, Risk};
use serde::Serialize;

use crate::auto_risk::{self, RiskAction};
use crate::register::RiskRegister;

/// Result of recording one control.
#[derive(Debug, Clone, Serialize)]
pub struct ControlRecorded {
    pub control: ControlAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<Risk>,
    pub risk_action: RiskAction,
}

impl RiskRegister {
    /// Upsert a control assessment. A non-compliant status creates or
    /// refreshes the control's risk; compliant statuses never touch risks.
    pub fn record_control_assessment(
        &self,
        assessment_id: i64,
        input: NewControlAssessment,
    ) -> GrcResult<ControlRecorded> {
        let (draft, overrides) = input.into_draft(assessment_id)?;
        let control = self.storage().upsert_control_assessment(&draft)?;
        tracing::info!(
            assessment_id,
            control_id = %control.control_id,
            status = %control.status,
            "control assessment recorded"
        );
        self.events().emit_control_assessed(&ControlAssessedEvent {
            assessment_id,
            control_id: control.control_id.clone(),
            status: control.status,
        });

        if !control.status.is_non_compliant() {
            return Ok(ControlRecorded {
                control,
                risk: None,
                risk_action: RiskAction::None,
            });
        }

        let outcome = auto_risk::sync_control_risk(
            self.storage().as_ref(),
            self.policy(),
            &control,
            overrides,
        )?;
        let action = match outcome.action {
            RiskAction::Created => {
                self.emit_created(&outcome.risk);
                AutoRiskAction::Created
            }
            _ => {
                let rescored = overrides.likelihood.is_some() || overrides.impact.is_some();
                self.emit_updated(&outcome.risk, rescored);
                AutoRiskAction::Refreshed
            }
        };
        self.events().emit_auto_risk_synced(&AutoRiskSyncedEvent {
            assessment_id,
            control_id: control.control_id.clone(),
            risk_id: outcome.risk.risk_id.clone(),
            action,
        });
        tracing::info!(
            assessment_id,
            control_id = %control.control_id,
            risk_id = %outcome.risk.risk_id,
            action = ?outcome.action,
            "auto-generated risk synced"
        );

        Ok(ControlRecorded {
            control,
            risk: Some(outcome.risk),
            risk_action: outcome.action,
        })
    }

    pub fn list_control_assessments(&self, assessment_id: i64) -> GrcResult<Vec<ControlAssessment>> {
        self.storage().list_control_assessments(assessment_id)
    }
}
