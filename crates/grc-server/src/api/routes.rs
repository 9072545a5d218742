use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use grc_core::errors::{GrcError, GrcResult};
use grc_register::RiskRegister;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    create_risk, delete_risk, export_risks, get_report, get_risk, health_check,
    list_controls, list_risks, record_control, risk_statistics, update_risk,
};
use crate::api::response::ApiError;

/// Shared state for every handler.
pub struct AppState {
    pub register: Arc<RiskRegister>,
}

impl AppState {
    pub fn new(register: Arc<RiskRegister>) -> Self {
        Self { register }
    }

    /// Run a register call on the blocking pool; storage access is synchronous.
    pub async fn run<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&RiskRegister) -> GrcResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let register = Arc::clone(&self.register);
        tokio::task::spawn_blocking(move || f(&register))
            .await
            .map_err(|e| GrcError::Internal(format!("register task failed: {e}")))?
            .map_err(ApiError::from)
    }
}

pub fn create_router(register: Arc<RiskRegister>) -> Router {
    let state = Arc::new(AppState::new(register));

    // Static segments are matched before `:id`.
    let api_routes = Router::new()
        .route("/risks", get(list_risks).post(create_risk))
        .route("/risks/statistics", get(risk_statistics))
        .route("/risks/export", get(export_risks))
        .route(
            "/risks/:id",
            get(get_risk).put(update_risk).delete(delete_risk),
        )
        .route(
            "/assessments/:assessment_id/controls",
            get(list_controls).post(record_control),
        )
        .route("/assessments/:assessment_id/report", get(get_report))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
}
