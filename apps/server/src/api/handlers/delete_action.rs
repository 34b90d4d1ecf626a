//! Form-style hospital deletion used by the dashboard

use crate::{
    api::extractors::IdPath, request_context::RequestContext, state::AppState, Error, Result,
};
use axum::{
    extract::State,
    http::Method,
    response::{IntoResponse, Redirect, Response},
    Extension,
};

pub const DASHBOARD_PATH: &str = "/dashboard/";

/// Delete on POST, then 303 back to the dashboard. Any other method only
/// redirects. Unknown ids are 404 either way.
pub async fn delete_hospital_action(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    method: Method,
    IdPath(id): IdPath,
) -> Result<Response> {
    if method == Method::POST {
        state.directory.delete_hospital(id).await?;
        tracing::info!(
            hospital_id = id,
            request_id = %ctx.request_id,
            "Hospital deleted from dashboard"
        );
    } else if state.store.get_hospital(id).await?.is_none() {
        return Err(Error::not_found("Hospital", id));
    }

    Ok(Redirect::to(DASHBOARD_PATH).into_response())
}
