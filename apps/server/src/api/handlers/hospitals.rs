//! Hospital CRUD handlers

use crate::{
    api::extractors::{IdPath, JsonBody, QueryParams},
    models::{Hospital, HospitalFilter, HospitalInput, HospitalPatch},
    state::AppState,
    Result,
};
use axum::{extract::State, http::StatusCode, Json};

pub async fn list_hospitals(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<HospitalFilter>,
) -> Result<Json<Vec<Hospital>>> {
    Ok(Json(state.directory.list_hospitals(&filter).await?))
}

pub async fn create_hospital(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<HospitalInput>,
) -> Result<(StatusCode, Json<Hospital>)> {
    let hospital = state.directory.create_hospital(input).await?;
    Ok((StatusCode::CREATED, Json(hospital)))
}

pub async fn get_hospital(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Hospital>> {
    Ok(Json(state.directory.get_hospital(id).await?))
}

pub async fn update_hospital(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<HospitalInput>,
) -> Result<Json<Hospital>> {
    Ok(Json(state.directory.update_hospital(id, input).await?))
}

pub async fn patch_hospital(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<HospitalPatch>,
) -> Result<Json<Hospital>> {
    Ok(Json(state.directory.patch_hospital(id, patch).await?))
}

pub async fn delete_hospital(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    state.directory.delete_hospital(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
