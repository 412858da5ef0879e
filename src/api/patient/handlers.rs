use crate::api::models::*;
use crate::model::{PatientMap, PatientRecord};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;

/// Full record mapping, keyed by patient id.
pub async fn view_handler(State(state): State<AppState>) -> Result<Json<PatientMap>, AppError> {
    let patients = state.patient_store.load()?;
    Ok(Json(patients))
}

/// Single record lookup.
pub async fn view_patient_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientRecord>, AppError> {
    let patients = state.patient_store.load()?;

    patients
        .get(&patient_id)
        .cloned()
        .map(Json)
        .ok_or_else(AppError::patient_not_found)
}

pub async fn create_patient_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(request) = payload?;

    // Validate and derive bmi/verdict
    let (patient_id, record) = request.into_record().map_err(AppError::Validation)?;

    let mut patients = state.patient_store.load()?;

    if patients.contains_key(&patient_id) {
        return Err(AppError::BadRequest(
            "Patient with this ID already exists".to_string(),
        ));
    }

    info!(patient_id = %patient_id, bmi = record.bmi, "Creating patient record");

    patients.insert(patient_id, record);
    state.patient_store.save(&patients)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Patient record created successfully".to_string(),
        }),
    ))
}

pub async fn update_patient_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    payload: Result<Json<UpdatePatientRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = payload?;

    let mut patients = state.patient_store.load()?;

    let existing = patients
        .get(&patient_id)
        .ok_or_else(AppError::patient_not_found)?;

    // Merge the partial payload, then re-validate and re-derive as a whole
    let updated = request.merge_into(existing).map_err(AppError::Validation)?;

    info!(patient_id = %patient_id, bmi = updated.bmi, "Updating patient record");

    patients.insert(patient_id, updated);
    state.patient_store.save(&patients)?;

    Ok(Json(MessageResponse {
        message: "Patient record updated successfully".to_string(),
    }))
}

pub async fn delete_patient_handler(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut patients = state.patient_store.load()?;

    if patients.remove(&patient_id).is_none() {
        return Err(AppError::patient_not_found());
    }

    info!(patient_id = %patient_id, "Deleted patient record");

    state.patient_store.save(&patients)?;

    Ok(Json(MessageResponse {
        message: "Patient record deleted successfully".to_string(),
    }))
}
