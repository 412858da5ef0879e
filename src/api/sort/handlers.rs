use crate::api::models::*;
use crate::model::PatientRecord;
use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

/// All records sorted by one of the numeric fields.
///
/// The sort is stable and the comparator (not the output) is reversed for
/// descending order, so ties keep the store's id order either way.
pub async fn sort_patients_handler(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<PatientRecord>>, AppError> {
    // Validate
    let (field, order) = params.validate().map_err(AppError::BadRequest)?;

    let patients = state.patient_store.load()?;

    let mut records: Vec<PatientRecord> = patients.into_values().collect();
    records.sort_by(|a, b| {
        let ordering = field.key(a).total_cmp(&field.key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    info!(
        sort_by = %params.sort_by,
        order = %params.order,
        count = records.len(),
        "Sorted patient records"
    );

    Ok(Json(records))
}
