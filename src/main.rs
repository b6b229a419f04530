//! Srini Health: Disease Risk Prediction
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use srini_health::adapters::{FsReportStore, JsonModelStore, PdfEncoder};
use srini_health::application::{ModelRegistry, PredictionService};
use srini_health::config::AppConfig;
use srini_health::domain::Disease;
use srini_health::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Writing logs to the terminal would corrupt the TUI (alternate screen):
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let use_file = config.log_mode.use_file(std::io::stdout().is_terminal());

    let (writer, _guard) = if use_file {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces on open below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Cannot open log file {:?}", config.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!("Starting Srini Health...");
    tracing::info!(
        "Models from {:?}, reports to {:?}",
        config.model_dir,
        config.report_dir
    );

    // Composition root: load once, share read-only.
    let registry = Arc::new(ModelRegistry::load(
        &JsonModelStore::new(&config.model_dir),
        &Disease::ALL,
    ));
    let service = PredictionService::new(
        registry,
        PdfEncoder::new(),
        FsReportStore::new(&config.report_dir),
    );

    let mut app = App::new(service, config.model_dir.display());
    app.run()?;

    tracing::info!("Srini Health shutdown complete.");
    Ok(())
}
