use super::{id_of, TestApp};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

pub async fn create_specialty(app: &TestApp, name: &str) -> anyhow::Result<i64> {
    let body = app
        .json(
            Method::POST,
            "/specialties/",
            Some(json!({ "name": name })),
            StatusCode::CREATED,
        )
        .await?;
    id_of(&body)
}

pub fn hospital_body(name: &str, address: &str, capacity: i32, specialty_ids: &[i64]) -> Value {
    json!({
        "name": name,
        "address": address,
        "total_capacity": capacity,
        "specialty_ids": specialty_ids,
    })
}

pub async fn create_hospital(
    app: &TestApp,
    name: &str,
    capacity: i32,
    specialty_ids: &[i64],
) -> anyhow::Result<i64> {
    create_hospital_at(app, name, "1 Main Street", capacity, specialty_ids).await
}

pub async fn create_hospital_at(
    app: &TestApp,
    name: &str,
    address: &str,
    capacity: i32,
    specialty_ids: &[i64],
) -> anyhow::Result<i64> {
    let body = app
        .json(
            Method::POST,
            "/hospitals/",
            Some(hospital_body(name, address, capacity, specialty_ids)),
            StatusCode::CREATED,
        )
        .await?;
    id_of(&body)
}

pub async fn create_patient(
    app: &TestApp,
    name: &str,
    status: &str,
    hospital_id: Option<i64>,
) -> anyhow::Result<i64> {
    let body = app
        .json(
            Method::POST,
            "/patients/",
            Some(json!({
                "name": name,
                "age": 42,
                "health_issue": "Chest pain",
                "status": status,
                "assigned_hospital_id": hospital_id,
            })),
            StatusCode::CREATED,
        )
        .await?;
    id_of(&body)
}

/// Admit `count` patients (status `IN`) to a hospital
pub async fn admit_patients(app: &TestApp, hospital_id: i64, count: usize) -> anyhow::Result<()> {
    for n in 0..count {
        create_patient(app, &format!("Patient {n}"), "IN", Some(hospital_id)).await?;
    }
    Ok(())
}

pub async fn create_appointment(
    app: &TestApp,
    date: &str,
    status: &str,
    hospital_id: Option<i64>,
    patient_id: Option<i64>,
) -> anyhow::Result<i64> {
    let body = app
        .json(
            Method::POST,
            "/appointments/",
            Some(json!({
                "appointment_date": date,
                "status": status,
                "hospital_id": hospital_id,
                "patient_id": patient_id,
            })),
            StatusCode::CREATED,
        )
        .await?;
    id_of(&body)
}
