//! Directory routes
//!
//! Every path is registered with and without its trailing slash; both forms are
//! served directly, no redirects.

use crate::api::handlers::{
    appointments, dashboard, delete_action, hospitals, issue_maps, patients, recommend,
    specialties,
};
use crate::state::AppState;
use axum::{
    routing::{get, post, MethodRouter},
    Router,
};

/// Register `route` at `path` and at `path` + `/`.
fn both(router: Router<AppState>, path: &str, route: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(path, route.clone())
        .route(&format!("{path}/"), route)
}

pub fn directory_routes() -> Router<AppState> {
    let mut router = Router::new();

    router = both(
        router,
        "/hospitals",
        get(hospitals::list_hospitals).post(hospitals::create_hospital),
    );
    router = both(
        router,
        "/hospitals/:id",
        get(hospitals::get_hospital)
            .put(hospitals::update_hospital)
            .patch(hospitals::patch_hospital)
            .delete(hospitals::delete_hospital),
    );

    router = both(
        router,
        "/specialties",
        get(specialties::list_specialties).post(specialties::create_specialty),
    );
    router = both(
        router,
        "/specialties/:id",
        get(specialties::get_specialty)
            .put(specialties::update_specialty)
            .patch(specialties::patch_specialty)
            .delete(specialties::delete_specialty),
    );

    router = both(
        router,
        "/patients",
        get(patients::list_patients).post(patients::create_patient),
    );
    router = both(
        router,
        "/patients/:id",
        get(patients::get_patient)
            .put(patients::update_patient)
            .patch(patients::patch_patient)
            .delete(patients::delete_patient),
    );

    router = both(
        router,
        "/appointments",
        get(appointments::list_appointments).post(appointments::create_appointment),
    );
    router = both(
        router,
        "/appointments/:id",
        get(appointments::get_appointment)
            .put(appointments::update_appointment)
            .patch(appointments::patch_appointment)
            .delete(appointments::delete_appointment),
    );

    router = both(
        router,
        "/issue-maps",
        get(issue_maps::list_issue_maps).post(issue_maps::create_issue_map),
    );
    router = both(
        router,
        "/issue-maps/:id",
        get(issue_maps::get_issue_map)
            .put(issue_maps::update_issue_map)
            .patch(issue_maps::patch_issue_map)
            .delete(issue_maps::delete_issue_map),
    );

    router = both(router, "/dashboard", get(dashboard::dashboard));
    router = both(
        router,
        "/hospital/:id/delete",
        post(delete_action::delete_hospital_action).get(delete_action::delete_hospital_action),
    );
    router = both(router, "/api/recommend", get(recommend::recommend));

    router
}
