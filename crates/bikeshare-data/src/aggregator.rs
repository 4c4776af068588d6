//! Rental aggregation by month and by record feature.
//!
//! All functions are pure: they take records by reference and build fresh
//! summary tables on every call.

use std::collections::HashMap;
use std::hash::Hash;

use bikeshare_core::models::{
    GroupKey, GroupValue, LongFormRow, Measure, MeasureTotals, RentalRecord, SummaryRow,
};

/// Stateless helper that groups rental records and sums their measures.
pub struct RentalAggregator;

impl RentalAggregator {
    /// Sum measures per calendar month name, e.g. `"January"`.
    ///
    /// The year is dropped, so the same month in different years collapses
    /// into one row. Rows come out in order of first appearance.
    pub fn monthly_summary<'a, I>(records: I) -> Vec<SummaryRow<String>>
    where
        I: IntoIterator<Item = &'a RentalRecord>,
    {
        Self::group_in_appearance_order(records, |r| Some(r.month_name().to_string()))
    }

    /// Sum measures per value of `key`, sorted descending by total.
    ///
    /// Groups with equal totals keep their first-appearance order. Records
    /// without a value for `key` are skipped.
    pub fn feature_summary<'a, I>(records: I, key: GroupKey) -> Vec<SummaryRow<GroupValue>>
    where
        I: IntoIterator<Item = &'a RentalRecord>,
    {
        let mut rows = Self::group_in_appearance_order(records, |r| key.value_of(r));
        rows.sort_by(|a, b| b.totals.total.cmp(&a.totals.total));
        rows
    }

    /// Reshape a wide summary into `(key, measure, value)` rows.
    ///
    /// Emits every casual row first, then every registered row, then every
    /// total row, each block following the summary's row order.
    pub fn to_long_form<K: Clone>(rows: &[SummaryRow<K>]) -> Vec<LongFormRow<K>> {
        Measure::ALL
            .iter()
            .flat_map(|&measure| {
                rows.iter().map(move |row| LongFormRow {
                    key: row.key.clone(),
                    measure,
                    value: row.totals.get(measure),
                })
            })
            .collect()
    }

    /// Feature summary for `key` reshaped into long form.
    pub fn feature_long_form<'a, I>(records: I, key: GroupKey) -> Vec<LongFormRow<GroupValue>>
    where
        I: IntoIterator<Item = &'a RentalRecord>,
    {
        Self::to_long_form(&Self::feature_summary(records, key))
    }

    /// Sum a summary table into a single [`MeasureTotals`].
    pub fn calculate_totals<K>(rows: &[SummaryRow<K>]) -> MeasureTotals {
        let mut totals = MeasureTotals::default();
        for row in rows {
            totals.merge(&row.totals);
        }
        totals
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic grouping driver.
    ///
    /// `key_fn` maps a record to its group; `None` drops the record.
    fn group_in_appearance_order<'a, I, K, F>(records: I, key_fn: F) -> Vec<SummaryRow<K>>
    where
        I: IntoIterator<Item = &'a RentalRecord>,
        K: Eq + Hash + Clone,
        F: Fn(&RentalRecord) -> Option<K>,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut rows: Vec<SummaryRow<K>> = Vec::new();

        for record in records {
            let Some(key) = key_fn(record) else {
                continue;
            };
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                rows.push(SummaryRow {
                    key,
                    totals: MeasureTotals::default(),
                });
                rows.len() - 1
            });
            rows[slot].totals.add_record(record);
        }

        rows
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
