//! Issue-to-specialty map handlers

use crate::{
    api::extractors::{IdPath, JsonBody},
    models::{IssueSpecialtyMap, IssueSpecialtyMapInput, IssueSpecialtyMapPatch},
    state::AppState,
    Result,
};
use axum::{extract::State, http::StatusCode, Json};

pub async fn list_issue_maps(
    State(state): State<AppState>,
) -> Result<Json<Vec<IssueSpecialtyMap>>> {
    Ok(Json(state.directory.list_issue_maps().await?))
}

pub async fn create_issue_map(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<IssueSpecialtyMapInput>,
) -> Result<(StatusCode, Json<IssueSpecialtyMap>)> {
    let map = state.directory.create_issue_map(input).await?;
    Ok((StatusCode::CREATED, Json(map)))
}

pub async fn get_issue_map(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<IssueSpecialtyMap>> {
    Ok(Json(state.directory.get_issue_map(id).await?))
}

pub async fn update_issue_map(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<IssueSpecialtyMapInput>,
) -> Result<Json<IssueSpecialtyMap>> {
    Ok(Json(state.directory.update_issue_map(id, input).await?))
}

pub async fn patch_issue_map(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<IssueSpecialtyMapPatch>,
) -> Result<Json<IssueSpecialtyMap>> {
    Ok(Json(state.directory.patch_issue_map(id, patch).await?))
}

pub async fn delete_issue_map(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    state.directory.delete_issue_map(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
