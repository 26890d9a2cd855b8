use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/status", get(handlers::status))
        .route("/api/reload", post(handlers::reload))
        .route("/api/home-summary", get(handlers::home_summary))
        .route("/api/patient-addresses", get(handlers::patient_addresses))
        .route("/api/patients", get(handlers::patients))
        .route(
            "/api/patients/:patient_id/charts/:metric",
            get(handlers::patient_chart),
        )
        .route("/api/charts/align", post(handlers::align_chart))
        .with_state(state)
}
