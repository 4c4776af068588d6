use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bike-sharing dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input (bad quoting, ragged rows, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the aggregator relies on is absent from the header row.
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// A data row could not be turned into a rental record.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// A date string did not match any recognised format.
    #[error("Invalid date format: {0}")]
    DateParse(String),

    /// The file holds a header but no records, so no date bounds exist.
    #[error("No rental records found in {0}")]
    EmptyDataset(PathBuf),

    /// The terminal could not be put into or taken out of TUI mode.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
