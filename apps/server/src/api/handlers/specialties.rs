//! Specialty CRUD handlers

use crate::{
    api::extractors::{IdPath, JsonBody, QueryParams},
    models::{Specialty, SpecialtyFilter, SpecialtyInput, SpecialtyPatch},
    state::AppState,
    Result,
};
use axum::{extract::State, http::StatusCode, Json};

pub async fn list_specialties(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<SpecialtyFilter>,
) -> Result<Json<Vec<Specialty>>> {
    Ok(Json(state.directory.list_specialties(&filter).await?))
}

pub async fn create_specialty(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SpecialtyInput>,
) -> Result<(StatusCode, Json<Specialty>)> {
    let specialty = state.directory.create_specialty(input).await?;
    Ok((StatusCode::CREATED, Json(specialty)))
}

pub async fn get_specialty(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Specialty>> {
    Ok(Json(state.directory.get_specialty(id).await?))
}

pub async fn update_specialty(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<SpecialtyInput>,
) -> Result<Json<Specialty>> {
    Ok(Json(state.directory.update_specialty(id, input).await?))
}

pub async fn patch_specialty(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<SpecialtyPatch>,
) -> Result<Json<Specialty>> {
    Ok(Json(state.directory.patch_specialty(id, patch).await?))
}

pub async fn delete_specialty(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    state.directory.delete_specialty(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
