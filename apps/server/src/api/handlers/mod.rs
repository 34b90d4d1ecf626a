//! Request handlers
//!
//! Handlers extract the request, call a service from `AppState` and shape the
//! response. Errors are returned as `crate::Error`, which renders itself.

pub mod appointments;
pub mod dashboard;
pub mod delete_action;
pub mod hospitals;
pub mod issue_maps;
pub mod metrics;
pub mod patients;
pub mod recommend;
pub mod specialties;
