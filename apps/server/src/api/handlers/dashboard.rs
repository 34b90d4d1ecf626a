//! Dashboard display payload

use crate::{api::extractors::QueryParams, models::DashboardSummary, state::AppState, Result};
use axum::{extract::State, Json};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub search: Option<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DashboardQuery>,
) -> Result<Json<DashboardSummary>> {
    let summary = state.dashboard.summary(query.search.as_deref()).await?;
    Ok(Json(summary))
}
