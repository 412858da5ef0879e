pub mod models;
pub mod patient;
pub mod sort;

// Re-exports
pub use models::*;

use axum::{Json, Router, extract::State, routing::get};

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/about", get(about_handler))
        .route("/health", get(health_handler))
        .merge(patient::routes())
        .merge(sort::routes())
        .with_state(state)
}

pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Patient Management System API".to_string(),
    })
}

pub async fn about_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Fully functional API to manage your patient records".to_string(),
    })
}

// Health handler (simple, keep here)
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let total_patients = state.patient_store.count().unwrap_or(0);
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        total_patients,
    })
}
