mod bootstrap;

use anyhow::{Context, Result};
use bikeshare_core::settings::Settings;
use bikeshare_data::context::DashboardContext;
use bikeshare_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();
    settings.validate()?;

    // Only the default log path creates ~/.bikeshare-dashboard.
    let home = bootstrap::home_dir();
    let log_file = bootstrap::resolve_log_file(settings.log_file.as_deref(), &home)?;
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!(
        "Bike Sharing Dashboard v{} starting",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        "Data: {}, Theme: {}, Log: {}",
        settings.data.display(),
        settings.theme,
        log_file.display()
    );

    // A dataset that cannot be loaded ends the program before the TUI starts.
    let context = DashboardContext::load(&settings.data)
        .inspect_err(|e| tracing::error!("Failed to load dataset: {e}"))
        .with_context(|| format!("cannot start dashboard with {}", settings.data.display()))?;

    let range = context.initial_range(settings.start, settings.end);
    App::new(context, range, &settings.theme).run()?;

    tracing::info!("Dashboard closed");
    Ok(())
}
