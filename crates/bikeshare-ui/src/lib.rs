//! Terminal UI layer for the bike-sharing dashboard.
//!
//! Provides themes, the header, metric-card, date-picker and footer
//! components, the monthly/hourly/season charts, the full dashboard layout
//! and the synchronous event loop, all built on [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod dashboard_view;
pub mod themes;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
