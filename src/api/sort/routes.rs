use crate::api::models::AppState;
use crate::api::sort::handlers::sort_patients_handler;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new().route("/sort", get(sort_patients_handler))
}
