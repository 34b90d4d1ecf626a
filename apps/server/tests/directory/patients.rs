//! Patient CRUD (/patients/)

use crate::support::{
    assert_status, create_hospital, create_patient, ids_of, with_test_app,
};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn defaults_to_pending() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let body = app
                .json(
                    Method::POST,
                    "/patients/",
                    Some(json!({ "name": "Ada", "health_issue": "Flu" })),
                    StatusCode::CREATED,
                )
                .await?;
            assert_eq!(body["status"], "PENDING");
            assert_eq!(body["assigned_hospital_id"], json!(null));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn rejects_bad_status_age_and_hospital() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for payload in [
                json!({ "name": "Ada", "health_issue": "Flu", "status": "ADMITTED" }),
                json!({ "name": "Ada", "health_issue": "Flu", "age": 200 }),
                json!({ "name": "Ada", "health_issue": "Flu", "assigned_hospital_id": 9 }),
            ] {
                let (status, _, body) = app
                    .request(Method::POST, "/patients/", Some(payload))
                    .await?;
                assert_status(status, StatusCode::BAD_REQUEST, &body);
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn filters_by_hospital_and_status() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let general = create_hospital(app, "General", 10, &[]).await?;
            let county = create_hospital(app, "County", 10, &[]).await?;
            let admitted = create_patient(app, "Ada", "IN", Some(general)).await?;
            let discharged = create_patient(app, "Bob", "OUT", Some(general)).await?;
            create_patient(app, "Cy", "IN", Some(county)).await?;

            let at_general = app
                .json(
                    Method::GET,
                    &format!("/patients/?hospital_id={general}"),
                    None,
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(ids_of(&at_general)?, vec![admitted, discharged]);

            let admitted_here = app
                .json(
                    Method::GET,
                    &format!("/patients/?hospital_id={general}&status=IN"),
                    None,
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(ids_of(&admitted_here)?, vec![admitted]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn patch_null_unassigns() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let general = create_hospital(app, "General", 10, &[]).await?;
            let patient = create_patient(app, "Ada", "IN", Some(general)).await?;

            let body = app
                .json(
                    Method::PATCH,
                    &format!("/patients/{patient}/"),
                    Some(json!({ "assigned_hospital_id": null, "status": "OUT" })),
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(body["assigned_hospital_id"], json!(null));
            assert_eq!(body["status"], "OUT");
            assert_eq!(body["age"], 42);
            Ok(())
        })
    })
    .await
}
