use crate::api::models::AppState;
use crate::api::patient::handlers::{
    create_patient_handler, delete_patient_handler, update_patient_handler, view_handler,
    view_patient_handler,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/view", get(view_handler))
        .route("/patient/{patient_id}", get(view_patient_handler))
        .route("/create", post(create_patient_handler))
        .route("/edit/{patient_id}", put(update_patient_handler))
        .route("/delete/{patient_id}", delete(delete_patient_handler))
}
