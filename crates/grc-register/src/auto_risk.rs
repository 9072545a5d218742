//! Risks raised from non-compliant control assessments.
//!
//! One auto-generated risk per (assessment, control). Recording the same
//! failed control again refreshes that risk instead of adding another.

use grc_core::config::ScoringConfig;
use grc_core::constants::{DEFAULT_IMPACT, DEFAULT_LIKELIHOOD};
use grc_core::errors::{GrcError, GrcResult, StorageError};
use grc_core::models::{
    ControlAssessment, MitigationStatus, Risk, RiskCategory, RiskDraft, RiskOverrides, RiskPatch,
};
use grc_core::traits::IRegisterStorage;
use serde::Serialize;

/// Factors assigned to auto-created risks unless a request overrides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRiskPolicy {
    pub likelihood: u8,
    pub impact: u8,
}

impl Default for AutoRiskPolicy {
    fn default() -> Self {
        Self {
            likelihood: DEFAULT_LIKELIHOOD,
            impact: DEFAULT_IMPACT,
        }
    }
}

impl AutoRiskPolicy {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            likelihood: config.effective_auto_risk_likelihood(),
            impact: config.effective_auto_risk_impact(),
        }
    }
}

/// What recording a control did to the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAction {
    Created,
    Refreshed,
    None,
}

#[derive(Debug, Clone)]
pub struct AutoRiskOutcome {
    pub risk: Risk,
    pub action: RiskAction,
}

/// `Control <id> (<category>) is not implemented: <detail>`.
pub fn describe(control: &ControlAssessment) -> String {
    let detail = match (control.response.as_deref(), control.comments.as_deref()) {
        (Some(response), Some(comments)) => format!("{response} Comments: {comments}"),
        (Some(response), None) => response.to_string(),
        (None, Some(comments)) => format!("Comments: {comments}"),
        (None, None) => "no assessment notes recorded".to_string(),
    };
    if control.category_name.is_empty() {
        format!("Control {} is not implemented: {detail}", control.control_id)
    } else {
        format!(
            "Control {} ({}) is not implemented: {detail}",
            control.control_id, control.category_name
        )
    }
}

/// Register category for a control's CSF function; Compliance when unknown.
pub fn category_for(control: &ControlAssessment) -> RiskCategory {
    control
        .function()
        .map(|f| f.risk_category())
        .unwrap_or_default()
}

/// Create or refresh the auto-generated risk for a non-compliant control.
pub fn sync_control_risk(
    storage: &dyn IRegisterStorage,
    policy: &AutoRiskPolicy,
    control: &ControlAssessment,
    overrides: RiskOverrides,
) -> GrcResult<AutoRiskOutcome> {
    if let Some(existing) = storage.find_control_risk(control.assessment_id, &control.control_id)? {
        return refresh(storage, control, &existing, overrides);
    }

    let draft = RiskDraft {
        assessment_id: Some(control.assessment_id),
        control_id: Some(control.control_id.clone()),
        description: describe(control),
        category: category_for(control),
        likelihood: overrides.likelihood.unwrap_or(policy.likelihood),
        impact: overrides.impact.unwrap_or(policy.impact),
        mitigation_strategy: None,
        mitigation_status: MitigationStatus::Open,
        owner: None,
        target_date: None,
        residual_likelihood: None,
        residual_impact: None,
        mitigation_notes: None,
        auto_generated: true,
    };

    match storage.create_risk(&draft) {
        Ok(risk) => Ok(AutoRiskOutcome {
            risk,
            action: RiskAction::Created,
        }),
        // A concurrent request raised the same control first.
        Err(GrcError::Storage(StorageError::ConstraintViolation { .. })) => {
            let existing = storage
                .find_control_risk(control.assessment_id, &control.control_id)?
                .ok_or_else(|| GrcError::not_found("risk for control", &control.control_id))?;
            refresh(storage, control, &existing, overrides)
        }
        Err(e) => Err(e),
    }
}

/// Refresh the description, apply explicit factor overrides, and reopen a
/// risk that was marked mitigated. Owner, strategy and category are kept.
fn refresh(
    storage: &dyn IRegisterStorage,
    control: &ControlAssessment,
    existing: &Risk,
    overrides: RiskOverrides,
) -> GrcResult<AutoRiskOutcome> {
    let patch = RiskPatch {
        description: Some(describe(control)),
        likelihood: overrides.likelihood.map(i64::from),
        impact: overrides.impact.map(i64::from),
        mitigation_status: (existing.mitigation_status == MitigationStatus::Mitigated)
            .then_some(MitigationStatus::Open),
        ..Default::default()
    };
    let risk = storage
        .update_risk(existing.id, &patch)?
        .ok_or_else(|| GrcError::not_found("risk", existing.id))?;
    Ok(AutoRiskOutcome {
        risk,
        action: RiskAction::Refreshed,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use grc_core::models::ControlStatus;

    use super::*;

    fn control(response: Option<&str>, comments: Option<&str>) -> ControlAssessment {
        ControlAssessment {
            id: 1,
            assessment_id: 4,
            control_id: "PR.AC-1".to_string(),
            category_name: "Identity Management and Access Control".to_string(),
            status: ControlStatus::NotImplemented,
            response: response.map(str::to_string),
            comments: comments.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn description_includes_response_and_comments() {
        assert_eq!(
            describe(&control(Some("No MFA on VPN."), Some("Budget pending"))),
            "Control PR.AC-1 (Identity Management and Access Control) is not implemented: \
             No MFA on VPN. Comments: Budget pending"
        );
        assert_eq!(
            describe(&control(None, None)),
            "Control PR.AC-1 (Identity Management and Access Control) is not implemented: \
             no assessment notes recorded"
        );
    }

    #[test]
    fn unknown_function_falls_back_to_compliance() {
        let mut c = control(None, None);
        assert_eq!(category_for(&c), RiskCategory::Technology);
        c.control_id = "XX.YY-1".to_string();
        assert_eq!(category_for(&c), RiskCategory::Compliance);
    }

    #[test]
    fn policy_reads_config() {
        let config = ScoringConfig {
            auto_risk_likelihood: Some(4),
            auto_risk_impact: None,
        };
        assert_eq!(
            AutoRiskPolicy::from_config(&config),
            AutoRiskPolicy {
                likelihood: 4,
                impact: 3
            }
        );
    }
}
