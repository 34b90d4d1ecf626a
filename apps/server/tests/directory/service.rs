//! Service endpoints and middleware behaviour

use crate::support::{assert_status, parse_json, with_test_app};
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn health_and_root() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let health = app
                .json(Method::GET, "/health", None, StatusCode::OK)
                .await?;
            assert_eq!(health["status"], "ok");

            let root = app.json(Method::GET, "/", None, StatusCode::OK).await?;
            assert_eq!(root["version"], env!("CARGO_PKG_VERSION"));
            assert_eq!(root["storage"], "memory");

            let (status, _, body) = app.request(Method::GET, "/favicon.ico", None).await?;
            assert_status(status, StatusCode::NO_CONTENT, &body);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn request_id_and_security_headers() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, headers, body) = app
                .request_with_extra_headers(
                    Method::GET,
                    "/hospitals/",
                    None,
                    &[("x-request-id", "client-123")],
                )
                .await?;
            assert_status(status, StatusCode::OK, &body);

            let request_id = headers.get("x-request-id").unwrap().to_str()?;
            assert_ne!(request_id, "client-123");
            assert_eq!(headers.get("x-correlation-id").unwrap(), "client-123");
            assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
            assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
            assert!(headers.get("strict-transport-security").is_none());
            // No exporter is installed, so there is no valid trace id to report
            assert!(headers.get("x-trace-id").is_none());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn metrics_exposition() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            app.request(Method::GET, "/api/recommend/?issue=cardio", None)
                .await?;

            let (status, _, body) = app.request(Method::GET, "/metrics", None).await?;
            assert_status(status, StatusCode::OK, &body);
            let text = String::from_utf8(body.to_vec())?;
            assert!(text.contains("hospital_directory_http_requests_total"));
            assert!(text.contains("hospital_directory_recommendations_total"));
            Ok(())
        })
    })
    .await
}

/// `path` label values of the HTTP request counter
fn request_path_labels() -> Vec<String> {
    prometheus::gather()
        .into_iter()
        .filter(|family| family.get_name() == "hospital_directory_http_requests_total")
        .flat_map(|family| family.get_metric().to_vec())
        .flat_map(|metric| {
            metric
                .get_label()
                .iter()
                .filter(|label| label.get_name() == "path")
                .map(|label| label.get_value().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

#[tokio::test]
async fn unknown_paths_share_one_metric_label() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            for i in 0..50 {
                let path = format!("/scan-{i}/x{i}y");
                let (status, _, body) = app.request(Method::GET, &path, None).await?;
                assert_status(status, StatusCode::NOT_FOUND, &body);
            }
            let (status, _, body) = app.request(Method::GET, "/hospitals/abc", None).await?;
            assert_status(status, StatusCode::BAD_REQUEST, &body);

            let labels = request_path_labels();
            assert!(labels.iter().all(|path| !path.contains("scan-")));
            assert!(!labels.iter().any(|path| path == "/hospitals/abc"));
            assert!(labels.iter().any(|path| path == "unmatched"));
            assert!(labels.iter().any(|path| path == "/hospitals/:id"));

            let unmatched_before = labels.iter().filter(|p| *p == "unmatched").count();
            app.request(Method::GET, "/scan-again/zzz", None).await?;
            let unmatched_after = request_path_labels()
                .iter()
                .filter(|p| *p == "unmatched")
                .count();
            assert_eq!(unmatched_before, unmatched_after);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn malformed_json_is_invalid() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _, body) = app
                .request(Method::POST, "/specialties/", Some(serde_json::json!([1, 2])))
                .await?;
            assert_status(status, StatusCode::BAD_REQUEST, &body);
            let value = parse_json(&body)?;
            assert_eq!(value["error"], "invalid");
            Ok(())
        })
    })
    .await
}
