//! Domain models: risks, their inputs and filters, statistics, control assessments.

pub mod control;
pub mod filter;
pub mod input;
pub mod risk;
pub mod statistics;

pub use control::{
    function_code_of, ControlAssessment, ControlAssessmentDraft, ControlStatus, CsfFunction,
    NewControlAssessment, RiskOverrides,
};
pub use filter::RiskFilter;
pub use input::{NewRisk, RiskDraft, RiskPatch};
pub use risk::{MitigationStatus, Risk, RiskCategory, RiskLevel};
pub use statistics::{LevelCounts, RiskStatistics, StatusBucket, StatusCounts};

/// Trims free text and collapses blank values to `None`.
pub(crate) fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Distinguishes an absent JSON key (`None`) from an explicit `null` (`Some(None)`).
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
