use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use bikeshare_core::settings::{dashboard_dir_in, default_log_file};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// The user's home directory, or the current directory when it is unknown.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Ensure the `.bikeshare-dashboard/logs/` hierarchy exists under `home`.
pub fn ensure_directories_in(home: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dashboard_dir_in(home).join("logs"))?;
    Ok(())
}

/// Pick the log file: `explicit` when `--log-file` was given, otherwise the
/// default under `home`.
///
/// Only the default path creates the dashboard's directories; an explicit
/// file leaves `home` untouched.
pub fn resolve_log_file(explicit: Option<&Path>, home: &Path) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            ensure_directories_in(home)?;
            Ok(default_log_file(home))
        }
    }
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an [`EnvFilter`] directive.
///
/// Unknown names are passed through so `RUST_LOG`-style directives work.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Initialise the global `tracing` subscriber, writing to `log_file`.
///
/// The terminal belongs to the dashboard while it runs, so log lines go to
/// the file only. Falls back to `"info"` if the level is not recognised.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = open_log_file(log_file)?;
    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories_in() {
        let tmp = TempDir::new().expect("tempdir");
        ensure_directories_in(tmp.path()).expect("ensure_directories_in should succeed");

        let dashboard_dir = tmp.path().join(".bikeshare-dashboard");
        assert!(dashboard_dir.is_dir());
        assert!(dashboard_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    #[test]
    fn test_resolve_log_file_default_creates_log_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let path = resolve_log_file(None, tmp.path()).expect("default log file");

        assert_eq!(path, default_log_file(tmp.path()));
        assert!(path.parent().is_some_and(Path::is_dir));
    }

    #[test]
    fn test_resolve_log_file_explicit_leaves_home_untouched() {
        let home = TempDir::new().expect("tempdir");
        let elsewhere = TempDir::new().expect("tempdir");
        let explicit = elsewhere.path().join("dash.log");

        let path = resolve_log_file(Some(&explicit), home.path()).expect("explicit log file");

        assert_eq!(path, explicit);
        assert!(!home.path().join(".bikeshare-dashboard").exists());
    }

    #[test]
    fn test_filter_directive_maps_level_names() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("info"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("ERROR"), "error");
        assert_eq!(filter_directive("bikeshare_data=trace"), "bikeshare_data=trace");
    }

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("nested").join("logs").join("dashboard.log");

        writeln!(open_log_file(&path).expect("first open"), "first").unwrap();
        writeln!(open_log_file(&path).expect("second open"), "second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_in_current_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("dashboard.log");
        assert!(open_log_file(&path).is_ok());
        assert!(path.is_file());
    }
}
