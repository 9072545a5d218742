use crate::errors::GrcResult;
use crate::models::{
    ControlAssessment, ControlAssessmentDraft, Risk, RiskDraft, RiskFilter, RiskPatch,
    RiskStatistics,
};

/// Risk CRUD + filtering + aggregation + control assessments.
///
/// Missing rows are reported as `Ok(None)` / `Ok(false)`, never as errors, so
/// callers can tell "not found" apart from an empty result or a failure.
pub trait IRegisterStorage: Send + Sync {
    // --- Risks ---
    fn create_risk(&self, draft: &RiskDraft) -> GrcResult<Risk>;
    fn get_risk(&self, id: i64) -> GrcResult<Option<Risk>>;
    fn list_risks(&self, filter: &RiskFilter) -> GrcResult<Vec<Risk>>;
    fn update_risk(&self, id: i64, patch: &RiskPatch) -> GrcResult<Option<Risk>>;
    fn delete_risk(&self, id: i64) -> GrcResult<bool>;

    /// The auto-generated risk raised for a control, if any.
    fn find_control_risk(&self, assessment_id: i64, control_id: &str) -> GrcResult<Option<Risk>>;

    // --- Aggregation ---
    fn risk_statistics(&self, assessment_id: Option<i64>) -> GrcResult<RiskStatistics>;

    // --- Control assessments ---
    /// Insert, or update the existing row for (assessment_id, control_id).
    fn upsert_control_assessment(&self, draft: &ControlAssessmentDraft) -> GrcResult<ControlAssessment>;
    fn list_control_assessments(&self, assessment_id: i64) -> GrcResult<Vec<ControlAssessment>>;

    // --- Diagnostics ---
    fn backend_name(&self) -> &'static str;
}
