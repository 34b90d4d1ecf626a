//! Dashboard payload (/dashboard/)

use crate::support::{
    create_appointment, create_hospital_at, create_specialty, ids_of, with_test_app,
};
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

#[tokio::test]
async fn aggregates_counts_and_chart() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let cardiology = create_specialty(app, "Cardiology").await?;
            let anesthesia = create_specialty(app, "Anesthesia").await?;
            create_specialty(app, "Radiology").await?;

            let mary =
                create_hospital_at(app, "St. Mary", "Springfield", 10, &[cardiology]).await?;
            let county = create_hospital_at(
                app,
                "County General",
                "Shelbyville",
                25,
                &[cardiology, anesthesia],
            )
            .await?;

            let today = Utc::now().date_naive();
            let tomorrow = (today + Duration::days(1)).to_string();
            let yesterday = (today - Duration::days(1)).to_string();
            create_appointment(app, &today.to_string(), "scheduled", Some(mary), None).await?;
            create_appointment(app, &tomorrow, "scheduled", None, None).await?;
            create_appointment(app, &tomorrow, "cancelled", None, None).await?;
            create_appointment(app, &yesterday, "scheduled", None, None).await?;

            let body = app
                .json(Method::GET, "/dashboard/", None, StatusCode::OK)
                .await?;

            assert_eq!(body["search"], json!(null));
            assert_eq!(ids_of(&body["hospitals"])?, vec![mary, county]);
            assert_eq!(body["hospital_count"], 2);
            assert_eq!(body["specialty_count"], 3);
            assert_eq!(body["total_capacity"], 35);
            assert_eq!(body["upcoming_appointments"], 2);
            assert_eq!(
                body["chart"],
                json!({
                    "labels": ["Anesthesia", "Cardiology", "Radiology"],
                    "data": [1, 2, 0],
                })
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn search_narrows_hospitals_and_capacity() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let cardiology = create_specialty(app, "Cardiology").await?;
            create_hospital_at(app, "St. Mary", "Springfield", 10, &[cardiology]).await?;
            let county =
                create_hospital_at(app, "County General", "Shelbyville", 25, &[cardiology])
                    .await?;

            let body = app
                .json(Method::GET, "/dashboard?search=SHELBY", None, StatusCode::OK)
                .await?;

            assert_eq!(body["search"], "SHELBY");
            assert_eq!(ids_of(&body["hospitals"])?, vec![county]);
            assert_eq!(body["hospital_count"], 1);
            assert_eq!(body["total_capacity"], 25);
            // The chart always covers every hospital
            assert_eq!(body["chart"]["data"], json!([2]));

            let nothing = app
                .json(Method::GET, "/dashboard/?search=nowhere", None, StatusCode::OK)
                .await?;
            assert_eq!(nothing["hospital_count"], 0);
            assert_eq!(nothing["total_capacity"], 0);
            Ok(())
        })
    })
    .await
}
