//! Hospital directory service
//!
//! A JSON web service over a hospital directory:
//! - CRUD for hospitals, specialties, patients, appointments and issue maps
//! - Hospital recommendation for a described medical issue, ranked by occupancy
//! - Dashboard aggregates (capacity, upcoming appointments, specialty chart)
//! - PostgreSQL or in-memory storage behind one store trait

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
