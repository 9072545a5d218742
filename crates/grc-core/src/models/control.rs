//! NIST CSF control assessments.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::normalize_text;
use super::risk::RiskCategory;
use crate::errors::ValidationError;
use crate::scoring::validate_factor;

/// Outcome recorded for a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStatus {
    NotStarted,
    InProgress,
    Complete,
    NotImplemented,
    NotApplicable,
}

impl ControlStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
            Self::NotImplemented => "not_implemented",
            Self::NotApplicable => "not_applicable",
        }
    }

    /// Statuses that raise a risk in the register.
    pub fn is_non_compliant(self) -> bool {
        matches!(self, Self::NotImplemented)
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            "not_implemented" => Ok(Self::NotImplemented),
            "not_applicable" => Ok(Self::NotApplicable),
            _ => Err(ValidationError::InvalidValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// CSF 2.0 functions, in canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsfFunction {
    Govern,
    Identify,
    Protect,
    Detect,
    Respond,
    Recover,
}

impl CsfFunction {
    pub const ALL: [CsfFunction; 6] = [
        Self::Govern,
        Self::Identify,
        Self::Protect,
        Self::Detect,
        Self::Respond,
        Self::Recover,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Govern => "GV",
            Self::Identify => "ID",
            Self::Protect => "PR",
            Self::Detect => "DE",
            Self::Respond => "RS",
            Self::Recover => "RC",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Govern => "Govern",
            Self::Identify => "Identify",
            Self::Protect => "Protect",
            Self::Detect => "Detect",
            Self::Respond => "Respond",
            Self::Recover => "Recover",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.code().eq_ignore_ascii_case(code))
    }

    /// Register category assigned to risks raised from this function's controls.
    pub fn risk_category(self) -> RiskCategory {
        match self {
            Self::Govern => RiskCategory::Strategic,
            Self::Identify | Self::Respond | Self::Recover => RiskCategory::Operational,
            Self::Protect | Self::Detect => RiskCategory::Technology,
        }
    }
}

/// Two-letter function prefix of a control id: `"PR.AC-1"` → `"PR"`.
pub fn function_code_of(control_id: &str) -> String {
    control_id
        .trim()
        .split(['.', '-', ' '])
        .next()
        .unwrap_or_default()
        .chars()
        .take(2)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// A recorded control assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlAssessment {
    pub id: i64,
    pub assessment_id: i64,
    pub control_id: String,
    pub category_name: String,
    pub status: ControlStatus,
    pub response: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ControlAssessment {
    pub fn function_code(&self) -> String {
        function_code_of(&self.control_id)
    }

    pub fn function(&self) -> Option<CsfFunction> {
        CsfFunction::from_code(&self.function_code())
    }
}

/// Request payload for recording a control assessment. The assessment id
/// comes from the route, not the body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewControlAssessment {
    pub control_id: Option<String>,
    pub category_name: Option<String>,
    pub status: Option<ControlStatus>,
    pub response: Option<String>,
    pub comments: Option<String>,
    /// Overrides the policy likelihood of an auto-created risk.
    pub likelihood: Option<i64>,
    /// Overrides the policy impact of an auto-created risk.
    pub impact: Option<i64>,
}

impl NewControlAssessment {
    pub fn into_draft(
        self,
        assessment_id: i64,
    ) -> Result<(ControlAssessmentDraft, RiskOverrides), ValidationError> {
        let control_id =
            normalize_text(self.control_id).ok_or(ValidationError::Required { field: "control_id" })?;
        let status = self.status.ok_or(ValidationError::Required { field: "status" })?;
        let overrides = RiskOverrides {
            likelihood: self
                .likelihood
                .map(|v| validate_factor("likelihood", v))
                .transpose()?,
            impact: self
                .impact
                .map(|v| validate_factor("impact", v))
                .transpose()?,
        };

        Ok((
            ControlAssessmentDraft {
                assessment_id,
                control_id,
                category_name: normalize_text(self.category_name).unwrap_or_default(),
                status,
                response: normalize_text(self.response),
                comments: normalize_text(self.comments),
            },
            overrides,
        ))
    }
}

/// Validated control assessment, keyed by (assessment_id, control_id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlAssessmentDraft {
    pub assessment_id: i64,
    pub control_id: String,
    pub category_name: String,
    pub status: ControlStatus,
    pub response: Option<String>,
    pub comments: Option<String>,
}

/// Explicit factor overrides for a risk raised from a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskOverrides {
    pub likelihood: Option<u8>,
    pub impact: Option<u8>,
}
