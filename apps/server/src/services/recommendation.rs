//! Hospital recommendation for a described medical issue

use crate::{
    config::RecommendationConfig,
    db::DirectoryStore,
    metrics,
    models::{HospitalRecommendation, RecommendationQuery},
    Result,
};
use std::sync::Arc;

pub struct RecommendationService {
    store: Arc<dyn DirectoryStore>,
    config: RecommendationConfig,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn DirectoryStore>, config: RecommendationConfig) -> Self {
        Self { store, config }
    }

    /// Hospitals treating `issue` with free beds, least occupied first.
    ///
    /// A hospital matches when one of its specialties contains the issue
    /// (case-insensitive), or offers the specialty an issue map assigns to the
    /// exact term. A missing or blank issue yields an empty list.
    pub async fn recommend(&self, issue: Option<&str>) -> Result<Vec<HospitalRecommendation>> {
        let Some(issue) = issue.map(str::trim).filter(|i| !i.is_empty()) else {
            metrics::RECOMMENDATIONS_TOTAL
                .with_label_values(&["empty_issue"])
                .inc();
            return Ok(Vec::new());
        };

        let mapped_specialty_id = if self.config.use_issue_maps {
            self.store
                .find_issue_map(issue)
                .await?
                .map(|m| m.primary_specialty.id)
        } else {
            None
        };

        let query = RecommendationQuery {
            issue: issue.to_string(),
            mapped_specialty_id,
            limit: self.config.max_results,
        };
        let recommendations = self.store.recommend_hospitals(&query).await?;

        let outcome = if recommendations.is_empty() {
            "no_match"
        } else {
            "matched"
        };
        let source = if mapped_specialty_id.is_some() {
            "issue_map"
        } else {
            "specialty_name"
        };
        metrics::RECOMMENDATIONS_TOTAL
            .with_label_values(&[outcome])
            .inc();
        metrics::RECOMMENDATION_RESULTS
            .with_label_values(&[source])
            .observe(recommendations.len() as f64);

        tracing::debug!(
            issue = %query.issue,
            mapped_specialty_id = ?mapped_specialty_id,
            results = recommendations.len(),
            best_available_beds = recommendations.first().map(|r| r.available_beds()),
            "Recommendation computed"
        );

        Ok(recommendations)
    }
}
