//! PostgreSQL directory store

use crate::{
    config::DatabaseConfig,
    db::{contains_pattern, DirectoryStore},
    models::{
        Appointment, AppointmentFilter, AppointmentInput, Hospital, HospitalFilter,
        HospitalInput, HospitalRecommendation, IssueSpecialtyMap, IssueSpecialtyMapInput, Patient,
        PatientFilter, PatientInput, RecommendationQuery, Specialty, SpecialtyFilter,
        SpecialtyInput,
    },
    Error, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;
use std::time::Duration;

const HOSPITAL_COLUMNS: &str = "id, name, address, total_capacity, created_at, updated_at";
const PATIENT_COLUMNS: &str =
    "id, name, age, health_issue, status, assigned_hospital_id, check_in_date";
const APPOINTMENT_COLUMNS: &str = "id, hospital_id, patient_id, status, appointment_date";

/// Create the connection pool from configuration
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(config.pool_min_size)
        .max_connections(config.pool_max_size)
        .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
        .connect(&config.url)
        .await?;
    Ok(pool)
}

/// Apply pending schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Translate constraint violations into API errors; everything else stays a database error.
fn map_constraint_error(err: sqlx::Error, context: &str) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return Error::Conflict(context.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return Error::InvalidReference(format!("{context}: {}", db_err.message()));
        }
        if db_err.is_check_violation() {
            return Error::Validation(format!("{context}: {}", db_err.message()));
        }
    }
    Error::Database(err)
}

/// Hospital columns without the specialty relation
struct HospitalRow {
    id: i64,
    name: String,
    address: String,
    total_capacity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl HospitalRow {
    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            total_capacity: row.try_get("total_capacity")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_hospital(self, specialties: Vec<Specialty>) -> Hospital {
        Hospital {
            id: self.id,
            name: self.name,
            address: self.address,
            total_capacity: self.total_capacity,
            specialties,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn specialty_from_row(row: &PgRow) -> Result<Specialty> {
    Ok(Specialty {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn issue_map_from_row(row: &PgRow) -> Result<IssueSpecialtyMap> {
    Ok(IssueSpecialtyMap {
        id: row.try_get("id")?,
        issue_term: row.try_get("issue_term")?,
        primary_specialty: Specialty {
            id: row.try_get("specialty_id")?,
            name: row.try_get("specialty_name")?,
        },
    })
}

fn patient_from_row(row: &PgRow) -> Result<Patient> {
    let status: String = row.try_get("status")?;
    Ok(Patient {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        health_issue: row.try_get("health_issue")?,
        status: status.parse()?,
        assigned_hospital_id: row.try_get("assigned_hospital_id")?,
        check_in_date: row.try_get("check_in_date")?,
    })
}

fn appointment_from_row(row: &PgRow) -> Result<Appointment> {
    let status: String = row.try_get("status")?;
    Ok(Appointment {
        id: row.try_get("id")?,
        hospital_id: row.try_get("hospital_id")?,
        patient_id: row.try_get("patient_id")?,
        status: status.parse()?,
        appointment_date: row.try_get("appointment_date")?,
    })
}

/// Replace the specialty links of a hospital inside an open transaction
async fn replace_specialty_links(
    tx: &mut Transaction<'_, Postgres>,
    hospital_id: i64,
    specialty_ids: &[i64],
) -> Result<()> {
    sqlx::query("DELETE FROM hospital_specialties WHERE hospital_id = $1")
        .bind(hospital_id)
        .execute(&mut **tx)
        .await?;

    if specialty_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO hospital_specialties (hospital_id, specialty_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(hospital_id)
    .bind(specialty_ids)
    .execute(&mut **tx)
    .await
    .map_err(|e| map_constraint_error(e, "Unknown specialty"))?;

    Ok(())
}

/// Repository for directory database operations
#[derive(Clone)]
pub struct PostgresDirectoryStore {
    pool: PgPool,
}

impl PostgresDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Load specialties for a batch of hospital rows in one query
    async fn with_specialties(&self, rows: Vec<HospitalRow>) -> Result<Vec<Hospital>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let links = sqlx::query(
            r#"
            SELECT hs.hospital_id, s.id, s.name
            FROM hospital_specialties hs
            JOIN specialties s ON s.id = hs.specialty_id
            WHERE hs.hospital_id = ANY($1)
            ORDER BY s.name COLLATE "C", s.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_hospital: HashMap<i64, Vec<Specialty>> = HashMap::new();
        for link in &links {
            let hospital_id: i64 = link.try_get("hospital_id")?;
            by_hospital
                .entry(hospital_id)
                .or_default()
                .push(specialty_from_row(link)?);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let specialties = by_hospital.remove(&row.id).unwrap_or_default();
                row.into_hospital(specialties)
            })
            .collect())
    }
}

#[async_trait]
impl DirectoryStore for PostgresDirectoryStore {
    async fn list_hospitals(&self, filter: &HospitalFilter) -> Result<Vec<Hospital>> {
        let query = format!(
            r#"
            SELECT {HOSPITAL_COLUMNS}
            FROM hospitals
            WHERE ($1::TEXT IS NULL OR name ILIKE $1)
              AND ($2::TEXT IS NULL OR address ILIKE $2)
              AND ($3::TEXT IS NULL OR name ILIKE $3 OR address ILIKE $3)
            ORDER BY id
            "#
        );

        let rows = sqlx::query(&query)
            .bind(filter.name().map(contains_pattern))
            .bind(filter.address().map(contains_pattern))
            .bind(filter.search_term().map(contains_pattern))
            .fetch_all(&self.pool)
            .await?;

        let rows = rows
            .iter()
            .map(HospitalRow::from_row)
            .collect::<Result<Vec<_>>>()?;
        self.with_specialties(rows).await
    }

    async fn get_hospital(&self, id: i64) -> Result<Option<Hospital>> {
        let query = format!("SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let row = HospitalRow::from_row(&row)?;
                Ok(self.with_specialties(vec![row]).await?.pop())
            }
            None => Ok(None),
        }
    }

    async fn create_hospital(&self, input: HospitalInput) -> Result<Hospital> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query(
            r#"
            INSERT INTO hospitals (name, address, total_capacity)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.total_capacity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "Invalid hospital"))?
        .try_get("id")?;

        replace_specialty_links(&mut tx, id, &input.specialty_ids).await?;
        tx.commit().await?;

        self.get_hospital(id)
            .await?
            .ok_or_else(|| Error::Internal(format!("Hospital {id} vanished after insert")))
    }

    async fn update_hospital(&self, id: i64, input: HospitalInput) -> Result<Option<Hospital>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE hospitals
            SET name = $2, address = $3, total_capacity = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.total_capacity)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, "Invalid hospital"))?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        replace_specialty_links(&mut tx, id, &input.specialty_ids).await?;
        tx.commit().await?;

        self.get_hospital(id).await
    }

    async fn delete_hospital(&self, id: i64) -> Result<bool> {
        // Specialty links cascade; patients and appointments are detached by ON DELETE SET NULL.
        let result = sqlx::query("DELETE FROM hospitals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_specialties(&self, filter: &SpecialtyFilter) -> Result<Vec<Specialty>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM specialties
            WHERE ($1::TEXT IS NULL OR name ILIKE $1)
            ORDER BY id
            "#,
        )
        .bind(filter.name().map(contains_pattern))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(specialty_from_row).collect()
    }

    async fn get_specialty(&self, id: i64) -> Result<Option<Specialty>> {
        let row = sqlx::query("SELECT id, name FROM specialties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(specialty_from_row).transpose()
    }

    async fn create_specialty(&self, input: SpecialtyInput) -> Result<Specialty> {
        let row = sqlx::query("INSERT INTO specialties (name) VALUES ($1) RETURNING id, name")
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "Invalid specialty"))?;
        specialty_from_row(&row)
    }

    async fn update_specialty(
        &self,
        id: i64,
        input: SpecialtyInput,
    ) -> Result<Option<Specialty>> {
        let row = sqlx::query("UPDATE specialties SET name = $2 WHERE id = $1 RETURNING id, name")
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "Invalid specialty"))?;
        row.as_ref().map(specialty_from_row).transpose()
    }

    async fn delete_specialty(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM specialties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_issue_maps(&self) -> Result<Vec<IssueSpecialtyMap>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.issue_term, s.id AS specialty_id, s.name AS specialty_name
            FROM issue_specialty_maps m
            JOIN specialties s ON s.id = m.primary_specialty_id
            ORDER BY m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(issue_map_from_row).collect()
    }

    async fn get_issue_map(&self, id: i64) -> Result<Option<IssueSpecialtyMap>> {
        let row = sqlx::query(
            r#"
            SELECT m.id, m.issue_term, s.id AS specialty_id, s.name AS specialty_name
            FROM issue_specialty_maps m
            JOIN specialties s ON s.id = m.primary_specialty_id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(issue_map_from_row).transpose()
    }

    async fn find_issue_map(&self, issue_term: &str) -> Result<Option<IssueSpecialtyMap>> {
        let row = sqlx::query(
            r#"
            SELECT m.id, m.issue_term, s.id AS specialty_id, s.name AS specialty_name
            FROM issue_specialty_maps m
            JOIN specialties s ON s.id = m.primary_specialty_id
            WHERE LOWER(m.issue_term) = LOWER($1)
            "#,
        )
        .bind(issue_term)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(issue_map_from_row).transpose()
    }

    async fn create_issue_map(&self, input: IssueSpecialtyMapInput) -> Result<IssueSpecialtyMap> {
        let context = format!("Issue term '{}' is already mapped", input.issue_term);
        let id: i64 = sqlx::query(
            r#"
            INSERT INTO issue_specialty_maps (issue_term, primary_specialty_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&input.issue_term)
        .bind(input.primary_specialty_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, &context))?
        .try_get("id")?;

        self.get_issue_map(id)
            .await?
            .ok_or_else(|| Error::Internal(format!("Issue map {id} vanished after insert")))
    }

    async fn update_issue_map(
        &self,
        id: i64,
        input: IssueSpecialtyMapInput,
    ) -> Result<Option<IssueSpecialtyMap>> {
        let context = format!("Issue term '{}' is already mapped", input.issue_term);
        let updated = sqlx::query(
            r#"
            UPDATE issue_specialty_maps
            SET issue_term = $2, primary_specialty_id = $3
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&input.issue_term)
        .bind(input.primary_specialty_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, &context))?;

        match updated {
            Some(_) => self.get_issue_map(id).await,
            None => Ok(None),
        }
    }

    async fn delete_issue_map(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM issue_specialty_maps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>> {
        let query = format!(
            r#"
            SELECT {PATIENT_COLUMNS}
            FROM patients
            WHERE ($1::BIGINT IS NULL OR assigned_hospital_id = $1)
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY id
            "#
        );
        let rows = sqlx::query(&query)
            .bind(filter.hospital_id)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(patient_from_row).collect()
    }

    async fn get_patient(&self, id: i64) -> Result<Option<Patient>> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(patient_from_row).transpose()
    }

    async fn create_patient(&self, input: PatientInput) -> Result<Patient> {
        let query = format!(
            r#"
            INSERT INTO patients (name, age, health_issue, status, assigned_hospital_id, check_in_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PATIENT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.health_issue)
            .bind(input.status.as_str())
            .bind(input.assigned_hospital_id)
            .bind(input.check_in_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "Unknown hospital"))?;
        patient_from_row(&row)
    }

    async fn update_patient(&self, id: i64, input: PatientInput) -> Result<Option<Patient>> {
        let query = format!(
            r#"
            UPDATE patients
            SET name = $2, age = $3, health_issue = $4, status = $5,
                assigned_hospital_id = $6, check_in_date = $7
            WHERE id = $1
            RETURNING {PATIENT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.age)
            .bind(&input.health_issue)
            .bind(input.status.as_str())
            .bind(input.assigned_hospital_id)
            .bind(input.check_in_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "Unknown hospital"))?;
        row.as_ref().map(patient_from_row).transpose()
    }

    async fn delete_patient(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>> {
        let query = format!(
            r#"
            SELECT {APPOINTMENT_COLUMNS}
            FROM appointments
            WHERE ($1::BIGINT IS NULL OR hospital_id = $1)
              AND ($2::BIGINT IS NULL OR patient_id = $2)
              AND ($3::TEXT IS NULL OR status = $3)
            ORDER BY id
            "#
        );
        let rows = sqlx::query(&query)
            .bind(filter.hospital_id)
            .bind(filter.patient_id)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(appointment_from_row).collect()
    }

    async fn get_appointment(&self, id: i64) -> Result<Option<Appointment>> {
        let query = format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(appointment_from_row).transpose()
    }

    async fn create_appointment(&self, input: AppointmentInput) -> Result<Appointment> {
        let query = format!(
            r#"
            INSERT INTO appointments (hospital_id, patient_id, status, appointment_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(input.hospital_id)
            .bind(input.patient_id)
            .bind(input.status.as_str())
            .bind(input.appointment_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "Unknown hospital or patient"))?;
        appointment_from_row(&row)
    }

    async fn update_appointment(
        &self,
        id: i64,
        input: AppointmentInput,
    ) -> Result<Option<Appointment>> {
        let query = format!(
            r#"
            UPDATE appointments
            SET hospital_id = $2, patient_id = $3, status = $4, appointment_date = $5
            WHERE id = $1
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(input.hospital_id)
            .bind(input.patient_id)
            .bind(input.status.as_str())
            .bind(input.appointment_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_constraint_error(e, "Unknown hospital or patient"))?;
        row.as_ref().map(appointment_from_row).transpose()
    }

    async fn delete_appointment(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn recommend_hospitals(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<HospitalRecommendation>> {
        // Occupancy is aggregated before the specialty match so a hospital with
        // several matching specialties still counts each patient once.
        let rows = sqlx::query(
            r#"
            WITH occupancy AS (
                SELECT assigned_hospital_id AS hospital_id, COUNT(*) AS active_patients
                FROM patients
                WHERE status = 'IN' AND assigned_hospital_id IS NOT NULL
                GROUP BY assigned_hospital_id
            )
            SELECT h.id, h.name, h.address, h.total_capacity, h.created_at, h.updated_at,
                   COALESCE(o.active_patients, 0) AS active_patients
            FROM hospitals h
            LEFT JOIN occupancy o ON o.hospital_id = h.id
            WHERE EXISTS (
                SELECT 1
                FROM hospital_specialties hs
                JOIN specialties s ON s.id = hs.specialty_id
                WHERE hs.hospital_id = h.id
                  AND (s.name ILIKE $1 OR s.id = $2::BIGINT)
            )
              AND COALESCE(o.active_patients, 0) < h.total_capacity
            ORDER BY active_patients ASC, h.id ASC
            LIMIT $3
            "#,
        )
        .bind(contains_pattern(&query.issue))
        .bind(query.mapped_specialty_id)
        .bind(i64::try_from(query.limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let mut active_by_id = HashMap::with_capacity(rows.len());
        let mut hospital_rows = Vec::with_capacity(rows.len());
        for row in &rows {
            let hospital = HospitalRow::from_row(row)?;
            let active_patients: i64 = row.try_get("active_patients")?;
            active_by_id.insert(hospital.id, active_patients);
            hospital_rows.push(hospital);
        }

        let hospitals = self.with_specialties(hospital_rows).await?;
        Ok(hospitals
            .into_iter()
            .map(|hospital| HospitalRecommendation {
                active_patients: active_by_id.get(&hospital.id).copied().unwrap_or(0),
                hospital,
            })
            .collect())
    }

    async fn specialty_hospital_counts(&self) -> Result<Vec<(Specialty, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, COUNT(hs.hospital_id) AS hospital_count
            FROM specialties s
            LEFT JOIN hospital_specialties hs ON hs.specialty_id = s.id
            GROUP BY s.id, s.name
            ORDER BY s.name COLLATE "C", s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Ok((specialty_from_row(row)?, row.try_get("hospital_count")?)))
            .collect()
    }

    async fn count_upcoming_appointments(&self, today: NaiveDate) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM appointments
            WHERE status = 'scheduled' AND appointment_date >= $1
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
