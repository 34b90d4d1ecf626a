//! Hospital CRUD (/hospitals/)

use crate::support::{
    assert_error_code, assert_status, create_hospital, create_hospital_at, create_specialty,
    hospital_body, id_of, ids_of, parse_json, with_test_app,
};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_returns_hospital_with_specialties() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let neurology = create_specialty(app, "Neurology").await?;
            let cardiology = create_specialty(app, "Cardiology").await?;

            let body = app
                .json(
                    Method::POST,
                    "/hospitals/",
                    Some(hospital_body(
                        "  St. Mary  ",
                        "12 Harbour Road",
                        40,
                        &[neurology, cardiology, neurology],
                    )),
                    StatusCode::CREATED,
                )
                .await?;

            assert_eq!(body["name"], "St. Mary");
            assert_eq!(body["total_capacity"], 40);
            let names: Vec<&str> = body["specialties"]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| s["name"].as_str().unwrap())
                .collect();
            assert_eq!(names, vec!["Cardiology", "Neurology"]);

            let id = id_of(&body)?;
            let fetched = app
                .json(Method::GET, &format!("/hospitals/{id}/"), None, StatusCode::OK)
                .await?;
            assert_eq!(fetched, body);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn routes_work_without_trailing_slash() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = create_hospital(app, "General", 5, &[]).await?;
            app.json(Method::GET, "/hospitals", None, StatusCode::OK)
                .await?;
            app.json(Method::GET, &format!("/hospitals/{id}"), None, StatusCode::OK)
                .await?;
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn invalid_payloads_are_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .request(
                    Method::POST,
                    "/hospitals/",
                    Some(hospital_body("General", "Main St", -1, &[])),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, &body);
            assert_error_code(&body, "invalid")?;

            let (status, _, body) = app
                .request(Method::POST, "/hospitals/", Some(json!({ "name": "x" })))
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, &body);

            let (status, _, body) = app
                .request(
                    Method::POST,
                    "/hospitals/",
                    Some(hospital_body("General", "Main St", 5, &[999])),
                )
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, &body);
            assert_error_code(&body, "invalid")?;
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_filters_by_name_address_and_search() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let mary = create_hospital_at(app, "St. Mary", "Springfield", 10, &[]).await?;
            let county = create_hospital_at(app, "County General", "Shelbyville", 10, &[]).await?;
            let spring = create_hospital_at(app, "Spring Clinic", "Capital City", 10, &[]).await?;

            let all = app
                .json(Method::GET, "/hospitals/", None, StatusCode::OK)
                .await?;
            assert_eq!(ids_of(&all)?, vec![mary, county, spring]);

            let by_name = app
                .json(Method::GET, "/hospitals/?name=MARY", None, StatusCode::OK)
                .await?;
            assert_eq!(ids_of(&by_name)?, vec![mary]);

            let by_address = app
                .json(Method::GET, "/hospitals/?address=shelby", None, StatusCode::OK)
                .await?;
            assert_eq!(ids_of(&by_address)?, vec![county]);

            let search = app
                .json(Method::GET, "/hospitals/?search=spring", None, StatusCode::OK)
                .await?;
            assert_eq!(ids_of(&search)?, vec![mary, spring]);

            let literal = app
                .json(Method::GET, "/hospitals/?search=%25", None, StatusCode::OK)
                .await?;
            assert!(ids_of(&literal)?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn put_replaces_and_patch_merges() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let cardiology = create_specialty(app, "Cardiology").await?;
            let id = create_hospital(app, "General", 5, &[cardiology]).await?;

            let replaced = app
                .json(
                    Method::PUT,
                    &format!("/hospitals/{id}/"),
                    Some(hospital_body("General West", "2 West Road", 8, &[])),
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(replaced["name"], "General West");
            assert_eq!(replaced["specialties"], json!([]));

            let patched = app
                .json(
                    Method::PATCH,
                    &format!("/hospitals/{id}/"),
                    Some(json!({ "specialty_ids": [cardiology] })),
                    StatusCode::OK,
                )
                .await?;
            assert_eq!(patched["name"], "General West");
            assert_eq!(patched["total_capacity"], 8);
            assert_eq!(patched["specialties"][0]["id"], cardiology);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn unknown_and_malformed_ids() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app.request(Method::GET, "/hospitals/404/", None).await?;
            assert_status(status, StatusCode::NOT_FOUND, &body);
            assert_error_code(&body, "not-found")?;

            let (status, _, body) = app
                .request(
                    Method::PUT,
                    "/hospitals/404/",
                    Some(hospital_body("x", "y", 1, &[])),
                )
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, &body);

            let (status, _, body) = app.request(Method::GET, "/hospitals/abc/", None).await?;
            assert_status(status, StatusCode::BAD_REQUEST, &body);
            assert_error_code(&body, "invalid")?;
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_returns_no_content_then_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let id = create_hospital(app, "General", 5, &[]).await?;

            let (status, _, body) = app
                .request(Method::DELETE, &format!("/hospitals/{id}/"), None)
                .await?;
            assert_status(status, StatusCode::NO_CONTENT, &body);

            let (status, _, body) = app
                .request(Method::DELETE, &format!("/hospitals/{id}/"), None)
                .await?;
            assert_status(status, StatusCode::NOT_FOUND, &body);

            let list = parse_json(
                &app.request(Method::GET, "/hospitals/", None).await?.2,
            )?;
            assert!(ids_of(&list)?.is_empty());
            Ok(())
        })
    })
    .await
}
