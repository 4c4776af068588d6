//! Process-lifetime state shared by every render pass.

use std::path::Path;

use bikeshare_core::error::Result;
use bikeshare_core::models::DateRange;
use chrono::NaiveDate;
use tracing::info;

use crate::analysis::{build_report, DashboardReport};
use crate::reader::{load_dataset, Dataset};

/// Owns the loaded dataset from startup to shutdown.
///
/// Created once in `main` and handed to the app; render passes only read it.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    dataset: Dataset,
}

impl DashboardContext {
    /// Wrap an already-loaded dataset.
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Load the dataset at `path`; a load failure is fatal to the caller.
    pub fn load(path: &Path) -> Result<Self> {
        load_dataset(path).map(Self::new)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Selectable bounds: the dataset's min and max date.
    pub fn bounds(&self) -> DateRange {
        self.dataset.full_range()
    }

    /// Initial range from optional CLI bounds, clamped into the dataset.
    ///
    /// Missing bounds default to the dataset's min / max date.
    pub fn initial_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        let bounds = self.bounds();
        let requested = DateRange::new(
            start.unwrap_or(bounds.start()),
            end.unwrap_or(bounds.end()),
        );
        let range = requested.clamp_to(&bounds);
        if range != requested {
            info!("Requested range {} clamped to {}", requested, range);
        }
        range
    }

    /// Recompute every view for `range`.
    pub fn report_for(&self, range: &DateRange) -> DashboardReport {
        build_report(&self.dataset, range)
    }
}
