//! Appointment CRUD handlers

use crate::{
    api::extractors::{IdPath, JsonBody, QueryParams},
    models::{Appointment, AppointmentFilter, AppointmentInput, AppointmentPatch},
    state::AppState,
    Result,
};
use axum::{extract::State, http::StatusCode, Json};

pub async fn list_appointments(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<AppointmentFilter>,
) -> Result<Json<Vec<Appointment>>> {
    Ok(Json(state.directory.list_appointments(&filter).await?))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AppointmentInput>,
) -> Result<(StatusCode, Json<Appointment>)> {
    let appointment = state.directory.create_appointment(input).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn get_appointment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Appointment>> {
    Ok(Json(state.directory.get_appointment(id).await?))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<AppointmentInput>,
) -> Result<Json<Appointment>> {
    Ok(Json(state.directory.update_appointment(id, input).await?))
}

pub async fn patch_appointment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<AppointmentPatch>,
) -> Result<Json<Appointment>> {
    Ok(Json(state.directory.patch_appointment(id, patch).await?))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    state.directory.delete_appointment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
