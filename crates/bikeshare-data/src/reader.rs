//! CSV loading for the bike-sharing dashboard.
//!
//! Reads the cleaned rentals table, checks that the columns the aggregator
//! relies on are present, and converts each row into a [`RentalRecord`].

use std::path::{Path, PathBuf};

use bikeshare_core::error::{DashboardError, Result};
use bikeshare_core::models::{DateRange, RentalRecord};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::{debug, info};

/// Header names every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "dteday",
    "workingday",
    "season_group",
    "casual",
    "registered",
    "total",
];

/// Optional hour-of-day column; when present every row must fill it.
pub const HOUR_COLUMN: &str = "hour";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The loaded rentals table plus its date bounds.
///
/// Records are sorted by `(date, hour)` and never mutated after loading.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<RentalRecord>,
    bounds: DateRange,
    source: PathBuf,
}

impl Dataset {
    /// Build a dataset from already-parsed records.
    ///
    /// Fails with [`DashboardError::EmptyDataset`] when `records` is empty,
    /// since an empty table has no selectable date range.
    pub fn from_records(mut records: Vec<RentalRecord>, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        records.sort_by_key(|r| (r.date, r.hour));

        let (first, last) = match (records.first(), records.last()) {
            (Some(f), Some(l)) => (f.date, l.date),
            _ => return Err(DashboardError::EmptyDataset(source)),
        };

        Ok(Self {
            records,
            bounds: DateRange::new(first, last),
            source,
        })
    }

    /// All records sorted by date, then hour. Rows with the same date and
    /// hour keep their load order.
    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest date across all records.
    pub fn min_date(&self) -> NaiveDate {
        self.bounds.start()
    }

    /// Latest date across all records.
    pub fn max_date(&self) -> NaiveDate {
        self.bounds.end()
    }

    /// The full selectable range, `min_date ..= max_date`.
    pub fn full_range(&self) -> DateRange {
        self.bounds
    }

    /// File the records were read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Records whose date lies inside `range` (bounds included).
    pub fn filter(&self, range: &DateRange) -> Vec<&RentalRecord> {
        // Records are date-sorted, so the matching rows form one contiguous run.
        let lo = self.records.partition_point(|r| r.date < range.start());
        let hi = self.records.partition_point(|r| r.date <= range.end());
        self.records[lo..hi.max(lo)].iter().collect()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the rentals CSV at `path` into a [`Dataset`].
///
/// Fails when the file is missing or unreadable, a required column is
/// absent, any row is malformed, or the file holds no records.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file)?;

    let dataset = Dataset::from_records(records, path)?;
    info!(
        "Loaded {} rental records from {} ({})",
        dataset.len(),
        path.display(),
        dataset.full_range()
    );
    Ok(dataset)
}

/// Parse rental records from any CSV source with a header row.
pub fn read_records<R: std::io::Read>(source: R) -> Result<Vec<RentalRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    let has_hour = headers.iter().any(|h| h == HOUR_COLUMN);
    debug!("CSV headers: {:?} (hour column: {})", headers, has_hour);

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<RawRow>().enumerate() {
        // 1-indexed, plus the header row.
        let line = idx as u64 + 2;
        let raw = result?;
        let record = raw
            .into_record(has_hour)
            .map_err(|reason| DashboardError::MalformedRow { line, reason })?;
        records.push(record);
    }

    Ok(records)
}

/// Parse a dataset date, accepting ISO dates, ISO date-times and US dates.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(d);
        }
    }
    NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
        .map(|dt| dt.date())
        .map_err(|_| DashboardError::DateParse(trimmed.to_string()))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// A CSV row as read, before type conversion. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    dteday: String,
    #[serde(default)]
    hour: Option<String>,
    workingday: String,
    season_group: String,
    casual: String,
    registered: String,
    total: String,
}

impl RawRow {
    fn into_record(self, has_hour: bool) -> std::result::Result<RentalRecord, String> {
        let date = parse_date(&self.dteday).map_err(|e| e.to_string())?;

        let hour = match self.hour.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            Some(h) => Some(parse_hour(h)?),
            None if has_hour => return Err("missing hour value".to_string()),
            None => None,
        };

        let season = self.season_group.trim().to_string();
        if season.is_empty() {
            return Err("missing season_group value".to_string());
        }

        Ok(RentalRecord {
            date,
            hour,
            working_day: parse_flag(&self.workingday)?,
            season,
            casual: parse_count("casual", &self.casual)?,
            registered: parse_count("registered", &self.registered)?,
            total: parse_count("total", &self.total)?,
        })
    }
}

fn parse_hour(s: &str) -> std::result::Result<u8, String> {
    match s.parse::<u8>() {
        Ok(h) if h < 24 => Ok(h),
        Ok(h) => Err(format!("hour {h} out of range")),
        Err(_) => Err(format!("invalid hour {s:?}")),
    }
}

fn parse_flag(s: &str) -> std::result::Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("invalid workingday flag {other:?}")),
    }
}

fn parse_count(column: &str, s: &str) -> std::result::Result<u64, String> {
    s.trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid {column} count {s:?}"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
