//! Report pipeline for the dashboard.
//!
//! Filters the dataset to a date range and computes the three views the
//! presenter draws, returning a [`DashboardReport`].

use std::time::Instant;

use bikeshare_core::models::{
    DateRange, GroupKey, GroupValue, LongFormRow, MeasureTotals, RentalRecord, SummaryRow,
};
use tracing::debug;

use crate::aggregator::RentalAggregator;
use crate::reader::Dataset;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything one render pass needs, computed from a single date range.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    /// Range the report was computed for.
    pub range: DateRange,
    /// Number of records inside the range.
    pub records_in_range: usize,
    /// Records inside the range that carry an hour; the hourly views use
    /// only these.
    pub records_with_hour: usize,
    /// Per-month sums, first-appearance order.
    pub monthly: Vec<SummaryRow<String>>,
    /// Sums across the monthly summary; drives the metric cards.
    pub monthly_totals: MeasureTotals,
    /// Hourly long form restricted to working days.
    pub working_day_hourly: Vec<LongFormRow<GroupValue>>,
    /// Hourly long form restricted to weekends and holidays.
    pub non_working_day_hourly: Vec<LongFormRow<GroupValue>>,
    /// Season long form over every record in range.
    pub seasonal: Vec<LongFormRow<GroupValue>>,
    /// Wall-clock seconds spent computing the report.
    pub compute_time_seconds: f64,
}

impl DashboardReport {
    /// `true` when the range selected no records at all.
    pub fn is_empty(&self) -> bool {
        self.records_in_range == 0
    }

    /// `true` when at least one record in range has an hour.
    pub fn has_hourly_data(&self) -> bool {
        self.records_with_hour > 0
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Build the full report for `range`.
///
/// Every call recomputes all views from scratch; an empty range yields empty
/// views rather than an error.
pub fn build_report(dataset: &Dataset, range: &DateRange) -> DashboardReport {
    let started = Instant::now();
    let in_range = dataset.filter(range);

    let report = summarize(&in_range, *range, started);

    debug!(
        "Report for {}: {} records, {} months, {}/{} hourly rows, {} season rows in {:.3}s",
        report.range,
        report.records_in_range,
        report.monthly.len(),
        report.working_day_hourly.len(),
        report.non_working_day_hourly.len(),
        report.seasonal.len(),
        report.compute_time_seconds,
    );

    report
}

/// Compute the three views over already-filtered records.
fn summarize(records: &[&RentalRecord], range: DateRange, started: Instant) -> DashboardReport {
    let monthly = RentalAggregator::monthly_summary(records.iter().copied());
    let monthly_totals = RentalAggregator::calculate_totals(&monthly);

    let working_day_hourly = RentalAggregator::feature_long_form(
        records.iter().copied().filter(|r| r.working_day),
        GroupKey::Hour,
    );
    let non_working_day_hourly = RentalAggregator::feature_long_form(
        records.iter().copied().filter(|r| !r.working_day),
        GroupKey::Hour,
    );
    let seasonal = RentalAggregator::feature_long_form(records.iter().copied(), GroupKey::Season);

    DashboardReport {
        range,
        records_in_range: records.len(),
        records_with_hour: records.iter().filter(|r| r.hour.is_some()).count(),
        monthly,
        monthly_totals,
        working_day_hourly,
        non_working_day_hourly,
        seasonal,
        compute_time_seconds: started.elapsed().as_secs_f64(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
