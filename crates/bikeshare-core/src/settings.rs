use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive terminal dashboard for bike-sharing rentals
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare-dashboard",
    about = "Interactive terminal dashboard for bike-sharing rentals",
    version
)]
pub struct Settings {
    /// Path to the cleaned rentals CSV
    #[arg(long, env = "BIKESHARE_DATA", default_value = "all_data.csv")]
    pub data: PathBuf,

    /// First day of the initial date range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day of the initial date range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.bikeshare-dashboard/logs/dashboard.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply `--debug`.
    pub fn load() -> Self {
        Self::from_settings(Settings::parse())
    }

    /// Same as [`Self::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_settings(Settings::parse_from(args))
    }

    fn from_settings(mut settings: Settings) -> Self {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Reject an initial range whose start lies after its end.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(DashboardError::Config(format!(
                    "--start {start} is after --end {end}"
                )));
            }
        }
        Ok(())
    }
}

/// Root of the dashboard's per-user directory, `~/.bikeshare-dashboard`.
pub fn dashboard_dir_in(base_dir: &std::path::Path) -> PathBuf {
    base_dir.join(".bikeshare-dashboard")
}

/// Default log file rooted at `base_dir` (used for testing).
pub fn default_log_file(base_dir: &std::path::Path) -> PathBuf {
    dashboard_dir_in(base_dir).join("logs").join("dashboard.log")
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {s:?}: {e}"))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
