//! The risk record and its enums.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::scoring;

/// Qualitative risk level, bucketed from a 1–25 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
    #[serde(alias = "critical")]
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ValidationError::InvalidValue {
                field: "risk_level",
                value: s.to_string(),
            }),
        }
    }
}

/// Business area a risk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(alias = "strategic")]
    Strategic,
    #[serde(alias = "operational")]
    Operational,
    #[serde(alias = "financial")]
    Financial,
    #[default]
    #[serde(alias = "compliance")]
    Compliance,
    #[serde(alias = "reputational")]
    Reputational,
    #[serde(alias = "technology")]
    Technology,
}

impl RiskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strategic => "Strategic",
            Self::Operational => "Operational",
            Self::Financial => "Financial",
            Self::Compliance => "Compliance",
            Self::Reputational => "Reputational",
            Self::Technology => "Technology",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strategic" => Ok(Self::Strategic),
            "operational" => Ok(Self::Operational),
            "financial" => Ok(Self::Financial),
            "compliance" => Ok(Self::Compliance),
            "reputational" => Ok(Self::Reputational),
            "technology" => Ok(Self::Technology),
            _ => Err(ValidationError::InvalidValue {
                field: "category",
                value: s.to_string(),
            }),
        }
    }
}

/// Where a risk stands in its treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStatus {
    #[default]
    Open,
    InProgress,
    Mitigated,
    Accepted,
    Transferred,
}

impl MitigationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Mitigated => "mitigated",
            Self::Accepted => "accepted",
            Self::Transferred => "transferred",
        }
    }
}

impl fmt::Display for MitigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MitigationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "mitigated" => Ok(Self::Mitigated),
            "accepted" => Ok(Self::Accepted),
            "transferred" => Ok(Self::Transferred),
            _ => Err(ValidationError::InvalidValue {
                field: "mitigation_status",
                value: s.to_string(),
            }),
        }
    }
}

/// One identified compliance or security gap.
///
/// `risk_score`/`risk_level` and their residual counterparts are derived from
/// the factor pairs and must only change through [`Risk::recompute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: i64,
    pub risk_id: String,
    pub assessment_id: Option<i64>,
    pub control_id: Option<String>,
    pub description: String,
    pub category: RiskCategory,
    pub likelihood: u8,
    pub impact: u8,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub mitigation_strategy: Option<String>,
    pub mitigation_status: MitigationStatus,
    pub owner: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub residual_likelihood: Option<u8>,
    pub residual_impact: Option<u8>,
    pub residual_score: Option<u8>,
    pub residual_level: Option<RiskLevel>,
    pub mitigation_notes: Option<String>,
    pub auto_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Risk {
    /// Re-derive initial and residual score/level from the factor pairs.
    pub fn recompute(&mut self) {
        let assessed = scoring::assess(self.likelihood, self.impact);
        self.risk_score = assessed.score;
        self.risk_level = assessed.level;

        let residual = scoring::assess_residual(self.residual_likelihood, self.residual_impact);
        self.residual_score = residual.map(|r| r.score);
        self.residual_level = residual.map(|r| r.level);
    }

    /// Register ordering: highest score first, then oldest id first.
    pub fn register_order(a: &Risk, b: &Risk) -> Ordering {
        b.risk_score.cmp(&a.risk_score).then(a.id.cmp(&b.id))
    }
}
