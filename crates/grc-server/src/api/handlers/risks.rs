//! `/api/risks` handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use grc_core::models::{NewRisk, Risk, RiskPatch, RiskStatistics};

use crate::api::dto::{RiskQuery, StatisticsQuery};
use crate::api::response::{ApiError, ApiResponse};
use crate::api::routes::AppState;

type ApiResult<T> = Result<T, ApiError>;

#[tracing::instrument(skip(state, query))]
pub async fn list_risks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RiskQuery>, QueryRejection>,
) -> ApiResult<ApiResponse<Vec<Risk>>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let risks = state.run(move |register| register.list(&filter)).await?;
    Ok(ApiResponse::list(risks))
}

#[tracing::instrument(skip(state, id))]
pub async fn get_risk(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<ApiResponse<Risk>> {
    let Path(id) = id?;
    let risk = state.run(move |register| register.get(id)).await?;
    Ok(ApiResponse::data(risk))
}

#[tracing::instrument(skip(state, body))]
pub async fn create_risk(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewRisk>, JsonRejection>,
) -> ApiResult<(StatusCode, ApiResponse<Risk>)> {
    let Json(input) = body?;
    let risk = state.run(move |register| register.create(input)).await?;
    tracing::info!(risk_id = %risk.risk_id, "risk created via API");
    Ok((
        StatusCode::CREATED,
        ApiResponse::data(risk).with_message("Risk created successfully"),
    ))
}

#[tracing::instrument(skip(state, id, body))]
pub async fn update_risk(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<RiskPatch>, JsonRejection>,
) -> ApiResult<ApiResponse<Risk>> {
    let Path(id) = id?;
    let Json(patch) = body?;
    let risk = state.run(move |register| register.update(id, &patch)).await?;
    Ok(ApiResponse::data(risk).with_message("Risk updated successfully"))
}

#[tracing::instrument(skip(state, id))]
pub async fn delete_risk(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<ApiResponse<()>> {
    let Path(id) = id?;
    state.run(move |register| register.delete(id)).await?;
    Ok(ApiResponse::message("Risk deleted successfully"))
}

#[tracing::instrument(skip(state, query))]
pub async fn risk_statistics(
    State(state): State<Arc<AppState>>,
    query: Result<Query<StatisticsQuery>, QueryRejection>,
) -> ApiResult<ApiResponse<RiskStatistics>> {
    let Query(query) = query?;
    let assessment_id = query.assessment_id()?;
    let stats = state
        .run(move |register| register.statistics(assessment_id))
        .await?;
    Ok(ApiResponse::data(stats))
}

/// CSV download of the filtered register.
#[tracing::instrument(skip(state, query))]
pub async fn export_risks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RiskQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let export = state.run(move |register| register.export_csv(&filter)).await?;
    tracing::info!(rows = export.rows, filename = %export.filename, "risk register exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    ))
}
