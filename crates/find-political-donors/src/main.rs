mod bootstrap;

use anyhow::{Context, Result};
use donors_core::settings::Settings;
use donors_runtime::driver::BatchDriver;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("find-political-donors v{} starting", env!("CARGO_PKG_VERSION"));

    let mut outputs = vec![settings.zip_output.clone(), settings.date_output.clone()];
    outputs.extend(settings.summary_file.clone());
    bootstrap::ensure_parent_dirs(&outputs)?;

    let driver = BatchDriver::from_settings(&settings);
    let summary = driver
        .run(&settings)
        .with_context(|| format!("failed to process {}", settings.input.display()))?;

    tracing::info!(
        "Wrote {} zip lines and {} date lines ({} records dropped, {} truncated lines skipped)",
        summary.zip_lines_written,
        summary.date_lines_written,
        summary.records_dropped,
        summary.lines_truncated
    );

    Ok(())
}
