use crate::model::{Gender, PatientRecord};
use crate::storage::{JsonStore, StoreError};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Application state shared across handlers.
///
/// The store is injected here rather than living as a module-level global,
/// so tests can point handlers at a throwaway file.
#[derive(Clone)]
pub struct AppState {
    pub patient_store: Arc<JsonStore>,
}

/// Request to create a new patient record.
#[derive(Debug, Deserialize)]
pub struct CreatePatientRequest {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

impl CreatePatientRequest {
    /// Validate the payload and derive bmi/verdict, yielding the map key
    /// and the stored value.
    pub fn into_record(self) -> Result<(String, PatientRecord), String> {
        if self.id.trim().is_empty() {
            return Err("Patient ID cannot be empty".to_string());
        }

        let record = PatientRecord::new(
            self.name,
            self.city,
            self.age,
            self.gender,
            self.height,
            self.weight,
        )?;

        Ok((self.id, record))
    }
}

/// Partial update: only supplied fields override the stored record.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl UpdatePatientRequest {
    /// Merge onto an existing record and re-run the full validation and
    /// derivation path, so bmi/verdict always match the merged values.
    pub fn merge_into(self, existing: &PatientRecord) -> Result<PatientRecord, String> {
        PatientRecord::new(
            self.name.unwrap_or_else(|| existing.name.clone()),
            self.city.unwrap_or_else(|| existing.city.clone()),
            self.age.unwrap_or(existing.age),
            self.gender.unwrap_or(existing.gender),
            self.height.unwrap_or(existing.height),
            self.weight.unwrap_or(existing.weight),
        )
    }
}

/// Query parameters for the sort endpoint.
#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub sort_by: String,

    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    "asc".to_string()
}

/// Sortable record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Age,
    Height,
    Weight,
    Bmi,
}

pub const VALID_SORT_FIELDS: [&str; 4] = ["age", "height", "weight", "bmi"];

impl SortField {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "age" => Some(SortField::Age),
            "height" => Some(SortField::Height),
            "weight" => Some(SortField::Weight),
            "bmi" => Some(SortField::Bmi),
            _ => None,
        }
    }

    /// Numeric sort key for a record.
    pub fn key(&self, record: &PatientRecord) -> f64 {
        match self {
            SortField::Age => f64::from(record.age),
            SortField::Height => record.height,
            SortField::Weight => record.weight,
            SortField::Bmi => record.bmi,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortParams {
    /// Validate the query parameters.
    pub fn validate(&self) -> Result<(SortField, SortOrder), String> {
        let field = SortField::parse(&self.sort_by).ok_or_else(|| {
            format!(
                "Invalid sort field. Choose from {:?}",
                VALID_SORT_FIELDS
            )
        })?;

        let order = match self.order.as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err("Invalid order. Choose \"asc\" or \"desc\"".to_string()),
        };

        Ok((field, order))
    }
}

/// Plain success message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_patients: usize,
}

/// Error response body; every error renders as a single detail string.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(String),
    Internal(String),
}

impl AppError {
    pub fn patient_not_found() -> Self {
        AppError::NotFound("Patient not found".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Ill-formed or ill-typed JSON bodies surface as 422 with the rejection
/// text as the detail string.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
