//! Appointment CRUD (/appointments/)

use crate::support::{
    assert_status, create_appointment, create_hospital, create_patient, ids_of, with_test_app,
};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_and_filter() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let general = create_hospital(app, "General", 10, &[]).await?;
            let ada = create_patient(app, "Ada", "PENDING", None).await?;

            let first =
                create_appointment(app, "2030-01-02", "scheduled", Some(general), Some(ada)).await?;
            let second =
                create_appointment(app, "2030-01-03", "cancelled", Some(general), None).await?;
            create_appointment(app, "2030-01-04", "scheduled", None, None).await?;

            let at_general = app
                .json(
                    Method::GET,
                    &format!("/appointments/?hospital_id={general}"),
                    None,
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(ids_of(&at_general)?, vec![first, second]);

            let for_ada = app
                .json(
                    Method::GET,
                    &format!("/appointments/?patient_id={ada}&status=scheduled"),
                    None,
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(ids_of(&for_ada)?, vec![first]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_date_and_references() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for payload in [
                json!({ "appointment_date": "not-a-date" }),
                json!({ "appointment_date": "2030-01-02", "status": "postponed" }),
                json!({ "appointment_date": "2030-01-02", "patient_id": 12 }),
            ] {
                let (status, _, body) = app
                    .request(Method::POST, "/appointments/", Some(payload))
                    .await?;
                assert_status(status, StatusCode::BAD_REQUEST, &body);
            }
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn deleting_patient_detaches_appointment() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let ada = create_patient(app, "Ada", "PENDING", None).await?;
            let appointment = create_appointment(app, "2030-01-02", "scheduled", None, Some(ada)).await?;

            let (status, _, body) = app
                .request(Method::DELETE, &format!("/patients/{ada}/"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, &body);

            let body = app
                .json(
                    Method::GET,
                    &format!("/appointments/{appointment}/"),
                    None,
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(body["patient_id"], json!(null));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn patch_changes_status_only() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let appointment = create_appointment(app, "2030-01-02", "scheduled", None, None).await?;
            let body = app
                .json(
                    Method::PATCH,
                    &format!("/appointments/{appointment}"),
                    Some(json!({ "status": "completed" })),
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(body["status"], "completed");
            assert_eq!(body["appointment_date"], "2030-01-02");
            Ok(())
        })
    })
    .await
}
