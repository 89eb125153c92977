//! AppLog demo
//!
//! Configures logging from the environment (`APP_LOG_FILE`, `APP_LOG_LEVEL`,
//! `APP_LOG_OVERRIDES`, optionally via `.env`) and emits a few records
//! through named loggers and through `tracing`.

use anyhow::{Context, Result};
use applog::{init_global, LoggingConfig};

fn main() -> Result<()> {
    // Load .env file if present (for development)
    dotenvy::dotenv().ok();

    let config = LoggingConfig::from_env().context("Invalid logging configuration")?;
    let registry = init_global(&config).context("Failed to initialize logging")?;

    let report = registry.logger("controllers.report_controller");
    report.info("rendering weekly report");
    report.warning("report template missing, using fallback");

    let issues = registry.logger("services.issue_service");
    issues.debug("fetching open issues");
    issues.info("loaded open issues");

    // Third-party style instrumentation goes through the same overrides
    tracing::debug!(target: "matplotlib::font_manager", "findfont: scoring fonts");
    tracing::info!(target: "app::startup", version = env!("CARGO_PKG_VERSION"), "ready");

    Ok(())
}
