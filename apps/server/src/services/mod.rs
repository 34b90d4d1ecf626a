//! Business logic layer
//!
//! Services sit between the HTTP handlers and the `DirectoryStore`: they
//! normalize and validate input, translate missing records into
//! `Error::NotFound`, and record metrics.

pub mod dashboard;
pub mod directory;
pub mod recommendation;

pub use dashboard::DashboardService;
pub use directory::DirectoryService;
pub use recommendation::RecommendationService;
