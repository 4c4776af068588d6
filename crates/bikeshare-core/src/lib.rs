//! Shared building blocks for the bike-sharing dashboard.
//!
//! Holds the error type, the rental record and summary models, number
//! formatting helpers and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
