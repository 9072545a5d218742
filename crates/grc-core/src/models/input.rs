//! Create and partial-update payloads for risks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::risk::{MitigationStatus, Risk, RiskCategory, RiskLevel};
use super::{double_option, normalize_text};
use crate::constants::{DEFAULT_IMPACT, DEFAULT_LIKELIHOOD};
use crate::errors::{GrcError, GrcResult, ValidationError};
use crate::scoring::validate_factor;

/// Create payload as received from a caller. Factors arrive as wide integers so
/// out-of-range values are reported as validation errors, not decode failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewRisk {
    pub assessment_id: Option<i64>,
    pub control_id: Option<String>,
    pub description: Option<String>,
    pub category: Option<RiskCategory>,
    pub likelihood: Option<i64>,
    pub impact: Option<i64>,
    pub mitigation_strategy: Option<String>,
    pub mitigation_status: Option<MitigationStatus>,
    pub owner: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub residual_likelihood: Option<i64>,
    pub residual_impact: Option<i64>,
    pub mitigation_notes: Option<String>,
}

impl NewRisk {
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Validate and apply defaults (category Compliance, factors 3/3, status open).
    pub fn into_draft(self) -> Result<RiskDraft, ValidationError> {
        let description = normalize_text(self.description)
            .ok_or(ValidationError::Required { field: "description" })?;

        let likelihood = match self.likelihood {
            Some(v) => validate_factor("likelihood", v)?,
            None => DEFAULT_LIKELIHOOD,
        };
        let impact = match self.impact {
            Some(v) => validate_factor("impact", v)?,
            None => DEFAULT_IMPACT,
        };
        let residual_likelihood = self
            .residual_likelihood
            .map(|v| validate_factor("residual_likelihood", v))
            .transpose()?;
        let residual_impact = self
            .residual_impact
            .map(|v| validate_factor("residual_impact", v))
            .transpose()?;

        Ok(RiskDraft {
            assessment_id: self.assessment_id,
            control_id: normalize_text(self.control_id),
            description,
            category: self.category.unwrap_or_default(),
            likelihood,
            impact,
            mitigation_strategy: normalize_text(self.mitigation_strategy),
            mitigation_status: self.mitigation_status.unwrap_or_default(),
            owner: normalize_text(self.owner),
            target_date: self.target_date,
            residual_likelihood,
            residual_impact,
            mitigation_notes: normalize_text(self.mitigation_notes),
            auto_generated: false,
        })
    }
}

/// A fully validated risk, ready to persist. Factors are guaranteed in range.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskDraft {
    pub assessment_id: Option<i64>,
    pub control_id: Option<String>,
    pub description: String,
    pub category: RiskCategory,
    pub likelihood: u8,
    pub impact: u8,
    pub mitigation_strategy: Option<String>,
    pub mitigation_status: MitigationStatus,
    pub owner: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub residual_likelihood: Option<u8>,
    pub residual_impact: Option<u8>,
    pub mitigation_notes: Option<String>,
    pub auto_generated: bool,
}

impl RiskDraft {
    /// Materialize the draft as a stored risk with derived fields computed.
    pub fn into_risk(self, id: i64, risk_id: String, now: DateTime<Utc>) -> Risk {
        let mut risk = Risk {
            id,
            risk_id,
            assessment_id: self.assessment_id,
            control_id: self.control_id,
            description: self.description,
            category: self.category,
            likelihood: self.likelihood,
            impact: self.impact,
            risk_score: 0,
            risk_level: RiskLevel::Low,
            mitigation_strategy: self.mitigation_strategy,
            mitigation_status: self.mitigation_status,
            owner: self.owner,
            target_date: self.target_date,
            residual_likelihood: self.residual_likelihood,
            residual_impact: self.residual_impact,
            residual_score: None,
            residual_level: None,
            mitigation_notes: self.mitigation_notes,
            auto_generated: self.auto_generated,
            created_at: now,
            updated_at: now,
        };
        risk.recompute();
        risk
    }
}

/// Partial update. Absent keys leave the field untouched; for nullable fields
/// an explicit `null` clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RiskPatch {
    #[serde(deserialize_with = "double_option::deserialize")]
    pub assessment_id: Option<Option<i64>>,
    #[serde(deserialize_with = "double_option::deserialize")]
    pub control_id: Option<Option<String>>,
    pub description: Option<String>,
    pub category: Option<RiskCategory>,
    pub likelihood: Option<i64>,
    pub impact: Option<i64>,
    #[serde(deserialize_with = "double_option::deserialize")]
    pub mitigation_strategy: Option<Option<String>>,
    pub mitigation_status: Option<MitigationStatus>,
    #[serde(deserialize_with = "double_option::deserialize")]
    pub owner: Option<Option<String>>,
    #[serde(deserialize_with = "double_option::deserialize")]
    pub target_date: Option<Option<NaiveDate>>,
    #[serde(deserialize_with = "double_option::deserialize")]
    pub residual_likelihood: Option<Option<i64>>,
    #[serde(deserialize_with = "double_option::deserialize")]
    pub residual_impact: Option<Option<i64>>,
    #[serde(deserialize_with = "double_option::deserialize")]
    pub mitigation_notes: Option<Option<String>>,
}

impl RiskPatch {
    /// True when the patch names any of the four score-relevant factors.
    pub fn touches_score(&self) -> bool {
        self.likelihood.is_some()
            || self.impact.is_some()
            || self.residual_likelihood.is_some()
            || self.residual_impact.is_some()
    }

    /// Validate the whole patch, then apply it to `risk` and re-derive scores.
    /// Nothing is modified when validation fails.
    pub fn apply_to(&self, risk: &mut Risk, now: DateTime<Utc>) -> GrcResult<()> {
        self.check_control_link(risk)?;

        let description = match &self.description {
            Some(d) => Some(
                normalize_text(Some(d.clone()))
                    .ok_or(ValidationError::Required { field: "description" })?,
            ),
            None => None,
        };
        let likelihood = self
            .likelihood
            .map(|v| validate_factor("likelihood", v))
            .transpose()?;
        let impact = self
            .impact
            .map(|v| validate_factor("impact", v))
            .transpose()?;
        let residual_likelihood =
            validate_nullable_factor("residual_likelihood", self.residual_likelihood)?;
        let residual_impact = validate_nullable_factor("residual_impact", self.residual_impact)?;

        if let Some(v) = self.assessment_id {
            risk.assessment_id = v;
        }
        if let Some(v) = &self.control_id {
            risk.control_id = normalize_text(v.clone());
        }
        if let Some(v) = description {
            risk.description = v;
        }
        if let Some(v) = self.category {
            risk.category = v;
        }
        if let Some(v) = likelihood {
            risk.likelihood = v;
        }
        if let Some(v) = impact {
            risk.impact = v;
        }
        if let Some(v) = &self.mitigation_strategy {
            risk.mitigation_strategy = normalize_text(v.clone());
        }
        if let Some(v) = self.mitigation_status {
            risk.mitigation_status = v;
        }
        if let Some(v) = &self.owner {
            risk.owner = normalize_text(v.clone());
        }
        if let Some(v) = self.target_date {
            risk.target_date = v;
        }
        if let Some(v) = residual_likelihood {
            risk.residual_likelihood = v;
        }
        if let Some(v) = residual_impact {
            risk.residual_impact = v;
        }
        if let Some(v) = &self.mitigation_notes {
            risk.mitigation_notes = normalize_text(v.clone());
        }

        risk.updated_at = now;
        risk.recompute();
        Ok(())
    }

    /// Auto-generated risks keep their back-reference for their whole life.
    fn check_control_link(&self, risk: &Risk) -> GrcResult<()> {
        if !risk.auto_generated {
            return Ok(());
        }
        if let Some(assessment_id) = self.assessment_id {
            if assessment_id != risk.assessment_id {
                return Err(GrcError::conflict(format!(
                    "risk {} was raised by a control assessment; its assessment link cannot change",
                    risk.risk_id
                )));
            }
        }
        if let Some(control_id) = &self.control_id {
            if normalize_text(control_id.clone()) != risk.control_id {
                return Err(GrcError::conflict(format!(
                    "risk {} was raised by a control assessment; its control link cannot change",
                    risk.risk_id
                )));
            }
        }
        Ok(())
    }
}

fn validate_nullable_factor(
    field: &'static str,
    value: Option<Option<i64>>,
) -> Result<Option<Option<u8>>, ValidationError> {
    match value {
        Some(Some(v)) => Ok(Some(Some(validate_factor(field, v)?))),
        Some(None) => Ok(Some(None)),
        None => Ok(None),
    }
}
