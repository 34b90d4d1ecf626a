//! Route tables

pub mod directory;
pub mod metrics;
