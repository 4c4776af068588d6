use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

/// One row of the cleaned bike-sharing dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRecord {
    /// Calendar day the rentals were counted on.
    pub date: NaiveDate,
    /// Hour of day (0-23); `None` for daily-granularity datasets.
    pub hour: Option<u8>,
    /// `true` for weekdays, `false` for weekends and holidays.
    pub working_day: bool,
    /// Season label, e.g. `"Summer"`.
    pub season: String,
    /// Rentals by casual riders.
    pub casual: u64,
    /// Rentals by registered riders.
    pub registered: u64,
    /// Total rentals; expected to equal `casual + registered`.
    pub total: u64,
}

impl RentalRecord {
    /// English month name of the record's date, e.g. `"January"`.
    pub fn month_name(&self) -> &'static str {
        month_name(self.date.month())
    }

    /// Value of `measure` for this record.
    pub fn measure(&self, measure: Measure) -> u64 {
        match measure {
            Measure::Casual => self.casual,
            Measure::Registered => self.registered,
            Measure::Total => self.total,
        }
    }
}

/// English month name for a 1-based month number.
///
/// Out-of-range numbers map to `"Unknown"`.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

// ── Measure ───────────────────────────────────────────────────────────────────

/// The three rental counts carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measure {
    Casual,
    Registered,
    Total,
}

impl Measure {
    /// All measures in long-form emission order.
    pub const ALL: [Measure; 3] = [Measure::Casual, Measure::Registered, Measure::Total];

    /// Lowercase type tag used in long-form rows and chart legends.
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Casual => "casual",
            Measure::Registered => "registered",
            Measure::Total => "total",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MeasureTotals ─────────────────────────────────────────────────────────────

/// Sums of the three measures over a group of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasureTotals {
    pub casual: u64,
    pub registered: u64,
    pub total: u64,
}

impl MeasureTotals {
    /// Add a single record's counts to the running totals.
    pub fn add_record(&mut self, record: &RentalRecord) {
        self.casual += record.casual;
        self.registered += record.registered;
        self.total += record.total;
    }

    /// Add another set of totals to this one.
    pub fn merge(&mut self, other: &MeasureTotals) {
        self.casual += other.casual;
        self.registered += other.registered;
        self.total += other.total;
    }

    /// Value of `measure` in these totals.
    pub fn get(&self, measure: Measure) -> u64 {
        match measure {
            Measure::Casual => self.casual,
            Measure::Registered => self.registered,
            Measure::Total => self.total,
        }
    }
}

// ── Summary tables ────────────────────────────────────────────────────────────

/// One row of a wide summary table: a group key and its measure sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow<K> {
    pub key: K,
    pub totals: MeasureTotals,
}

/// One row of a long-form table: `(group key, measure type, value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongFormRow<K> {
    pub key: K,
    pub measure: Measure,
    pub value: u64,
}

/// Which record attribute a feature summary groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Hour of day (records without an hour are skipped).
    Hour,
    /// Season label.
    Season,
}

impl GroupKey {
    /// Extract the grouping value of `record`, if it has one.
    pub fn value_of(&self, record: &RentalRecord) -> Option<GroupValue> {
        match self {
            GroupKey::Hour => record.hour.map(GroupValue::Hour),
            GroupKey::Season => Some(GroupValue::Season(record.season.clone())),
        }
    }

    /// Human-readable axis label for this key.
    pub const fn label(&self) -> &'static str {
        match self {
            GroupKey::Hour => "Hour",
            GroupKey::Season => "Season",
        }
    }
}

/// A concrete grouping value produced by a [`GroupKey`].
///
/// Hours order numerically; seasons order by label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupValue {
    Hour(u8),
    Season(String),
}

impl fmt::Display for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Hour(h) => write!(f, "{h}"),
            GroupValue::Season(s) => f.write_str(s),
        }
    }
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Inclusive calendar-day range used to filter records.
///
/// `start <= end` always holds; reversed bounds are swapped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if they are given reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A range covering a single day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `true` when `date` lies within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, bounds included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Clamp both bounds into `bounds`.
    pub fn clamp_to(&self, bounds: &DateRange) -> Self {
        let clamp = |d: NaiveDate| d.clamp(bounds.start, bounds.end);
        Self::new(clamp(self.start), clamp(self.end))
    }

    /// Move the start bound by `days`, staying within `bounds` and never
    /// passing the end bound.
    pub fn shift_start(&self, days: i64, bounds: &DateRange) -> Self {
        let moved = offset_days(self.start, days);
        Self {
            start: moved.max(bounds.start).min(self.end),
            end: self.end,
        }
    }

    /// Move the end bound by `days`, staying within `bounds` and never
    /// passing the start bound.
    pub fn shift_end(&self, days: i64, bounds: &DateRange) -> Self {
        let moved = offset_days(self.end, days);
        Self {
            start: self.start,
            end: moved.min(bounds.end).max(self.start),
        }
    }

    /// Move the start bound by whole months (see [`Self::shift_start`]).
    pub fn shift_start_months(&self, months: i32, bounds: &DateRange) -> Self {
        let moved = offset_months(self.start, months);
        Self {
            start: moved.max(bounds.start).min(self.end),
            end: self.end,
        }
    }

    /// Move the end bound by whole months (see [`Self::shift_end`]).
    pub fn shift_end_months(&self, months: i32, bounds: &DateRange) -> Self {
        let moved = offset_months(self.end, months);
        Self {
            start: self.start,
            end: moved.min(bounds.end).max(self.start),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Saturating day offset; overflow leaves the date unchanged.
fn offset_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(chrono::Duration::days(days))
        .unwrap_or(date)
}

/// Saturating month offset; day-of-month is clipped to the target month.
fn offset_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
