//! `/api/assessments/:assessment_id/controls` handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use grc_core::models::{ControlAssessment, NewControlAssessment};
use grc_register::{ControlRecorded, RiskAction};

use crate::api::response::{ApiError, ApiResponse};
use crate::api::routes::AppState;

/// Upsert a control assessment. 201 when it raised a new risk.
#[tracing::instrument(skip(state, assessment_id, body))]
pub async fn record_control(
    State(state): State<Arc<AppState>>,
    assessment_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewControlAssessment>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<ControlRecorded>), ApiError> {
    let Path(assessment_id) = assessment_id?;
    let Json(input) = body?;
    let recorded = state
        .run(move |register| register.record_control_assessment(assessment_id, input))
        .await?;

    let (status, message) = match recorded.risk_action {
        RiskAction::Created => (StatusCode::CREATED, "Control assessment recorded; risk created"),
        RiskAction::Refreshed => (StatusCode::OK, "Control assessment recorded; risk refreshed"),
        RiskAction::None => (StatusCode::OK, "Control assessment recorded"),
    };
    Ok((status, ApiResponse::data(recorded).with_message(message)))
}

#[tracing::instrument(skip(state, assessment_id))]
pub async fn list_controls(
    State(state): State<Arc<AppState>>,
    assessment_id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Vec<ControlAssessment>>, ApiError> {
    let Path(assessment_id) = assessment_id?;
    let controls = state
        .run(move |register| register.list_control_assessments(assessment_id))
        .await?;
    Ok(ApiResponse::list(controls))
}
