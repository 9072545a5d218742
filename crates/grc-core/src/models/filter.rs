//! Register filters. Present filters are AND-combined; absent ones match everything.

use super::risk::{MitigationStatus, Risk, RiskLevel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskFilter {
    pub assessment_id: Option<i64>,
    pub risk_level: Option<RiskLevel>,
    pub mitigation_status: Option<MitigationStatus>,
}

impl RiskFilter {
    pub fn for_assessment(assessment_id: i64) -> Self {
        Self {
            assessment_id: Some(assessment_id),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assessment_id.is_none() && self.risk_level.is_none() && self.mitigation_status.is_none()
    }

    pub fn matches(&self, risk: &Risk) -> bool {
        self.assessment_id.map_or(true, |id| risk.assessment_id == Some(id))
            && self.risk_level.map_or(true, |level| risk.risk_level == level)
            && self
                .mitigation_status
                .map_or(true, |status| risk.mitigation_status == status)
    }
}
