use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;

use crate::api::response::ApiResponse;
use crate::api::routes::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub backend: &'static str,
    pub version: &'static str,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResponse<HealthStatus> {
    ApiResponse::data(HealthStatus {
        status: "healthy",
        backend: state.register.backend_name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
