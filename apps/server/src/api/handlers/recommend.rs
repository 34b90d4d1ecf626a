//! Recommendation endpoint

use crate::{
    api::extractors::QueryParams, models::HospitalRecommendation, state::AppState, Result,
};
use axum::{extract::State, Json};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RecommendQuery {
    pub issue: Option<String>,
}

/// `GET /api/recommend/?issue=...`
///
/// Always a JSON array; a missing issue is an empty result, not an error.
pub async fn recommend(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RecommendQuery>,
) -> Result<Json<Vec<HospitalRecommendation>>> {
    let recommendations = state
        .recommendations
        .recommend(query.issue.as_deref())
        .await?;
    Ok(Json(recommendations))
}
