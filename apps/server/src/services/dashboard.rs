//! Dashboard aggregation

use crate::{
    db::DirectoryStore,
    models::{DashboardSummary, HospitalFilter, SpecialtyChart, SpecialtyFilter},
    Result,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

pub struct DashboardService {
    store: Arc<dyn DirectoryStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    pub async fn summary(&self, search: Option<&str>) -> Result<DashboardSummary> {
        self.summary_on(search, Utc::now().date_naive()).await
    }

    /// Build the dashboard as of `today`.
    ///
    /// The search narrows the hospital list and the capacity total; the
    /// specialty chart always covers every hospital.
    pub async fn summary_on(
        &self,
        search: Option<&str>,
        today: NaiveDate,
    ) -> Result<DashboardSummary> {
        let filter = HospitalFilter::search(search);
        let hospitals = self.store.list_hospitals(&filter).await?;
        let specialties = self
            .store
            .list_specialties(&SpecialtyFilter::default())
            .await?;
        let chart = SpecialtyChart::from_counts(self.store.specialty_hospital_counts().await?);
        let upcoming_appointments = self.store.count_upcoming_appointments(today).await?;

        let total_capacity = hospitals
            .iter()
            .map(|h| i64::from(h.total_capacity))
            .sum();

        Ok(DashboardSummary {
            search: filter.search_term().map(str::to_string),
            hospital_count: hospitals.len(),
            specialty_count: specialties.len(),
            hospitals,
            specialties,
            total_capacity,
            upcoming_appointments,
            chart,
        })
    }
}
