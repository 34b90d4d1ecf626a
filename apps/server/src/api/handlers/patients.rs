//! Patient CRUD handlers

use crate::{
    api::extractors::{IdPath, JsonBody, QueryParams},
    models::{Patient, PatientFilter, PatientInput, PatientPatch},
    state::AppState,
    Result,
};
use axum::{extract::State, http::StatusCode, Json};

pub async fn list_patients(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<PatientFilter>,
) -> Result<Json<Vec<Patient>>> {
    Ok(Json(state.directory.list_patients(&filter).await?))
}

pub async fn create_patient(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<PatientInput>,
) -> Result<(StatusCode, Json<Patient>)> {
    let patient = state.directory.create_patient(input).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn get_patient(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Patient>> {
    Ok(Json(state.directory.get_patient(id).await?))
}

pub async fn update_patient(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<PatientInput>,
) -> Result<Json<Patient>> {
    Ok(Json(state.directory.update_patient(id, input).await?))
}

pub async fn patch_patient(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<PatientPatch>,
) -> Result<Json<Patient>> {
    Ok(Json(state.directory.patch_patient(id, patch).await?))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    state.directory.delete_patient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
