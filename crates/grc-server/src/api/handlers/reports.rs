use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use grc_register::report::render_markdown;

use crate::api::dto::{ReportFormat, ReportQuery};
use crate::api::response::{ApiError, ApiResponse};
use crate::api::routes::AppState;

/// Compliance report for one assessment, as JSON or Markdown.
#[tracing::instrument(skip(state, assessment_id, query))]
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    assessment_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Path(assessment_id) = assessment_id?;
    let Query(query) = query?;
    let format = query.format()?;
    let report = state
        .run(move |register| register.compliance_report(assessment_id))
        .await?;

    Ok(match format {
        ReportFormat::Json => ApiResponse::data(report).into_response(),
        ReportFormat::Markdown => (
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            render_markdown(&report),
        )
            .into_response(),
    })
}
