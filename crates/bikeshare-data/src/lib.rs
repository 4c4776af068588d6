//! Data layer for the bike-sharing dashboard.
//!
//! Loads the cleaned rentals CSV, aggregates records by month, hour and
//! season, builds per-range reports and owns the process-lifetime
//! [`context::DashboardContext`].

pub mod aggregator;
pub mod analysis;
pub mod context;
pub mod reader;

pub use bikeshare_core as core;
