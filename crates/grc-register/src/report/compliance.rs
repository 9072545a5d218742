//! The assembled compliance report.

use chrono::{DateTime, Utc};
use grc_core::models::{ControlAssessment, MitigationStatus, Risk, RiskLevel, RiskStatistics};
use serde::Serialize;

use super::aggregation::{aggregate, FunctionSummary, StatusTally};
use super::findings::{findings, recommendations, Findings, Recommendation};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    #[serde(flatten)]
    pub tally: StatusTally,
    pub completion: u32,
}

/// Stateless: built fresh from the current controls and risks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub assessment_id: i64,
    pub generated_at: DateTime<Utc>,
    pub overall: OverallSummary,
    pub functions: Vec<FunctionSummary>,
    pub risk_statistics: RiskStatistics,
    pub findings: Findings,
    pub recommendations: Vec<Recommendation>,
}

/// Critical risks still awaiting treatment.
fn is_open_critical(risk: &Risk) -> bool {
    risk.risk_level == RiskLevel::Critical
        && matches!(
            risk.mitigation_status,
            MitigationStatus::Open | MitigationStatus::InProgress
        )
}

impl ComplianceReport {
    /// `risks` should be the assessment's risks.
    pub fn build(
        assessment_id: i64,
        controls: &[ControlAssessment],
        risks: &[Risk],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let agg = aggregate(controls);
        let open_critical = risks.iter().filter(|r| is_open_critical(r)).count() as u64;
        let findings = findings(&agg, open_critical);
        let recommendations = recommendations(&agg, &findings);

        Self {
            assessment_id,
            generated_at,
            overall: OverallSummary {
                tally: agg.overall,
                completion: agg.overall_completion,
            },
            functions: agg.functions,
            risk_statistics: RiskStatistics::from_risks(risks),
            findings,
            recommendations,
        }
    }
}
