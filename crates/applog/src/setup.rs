//! Logging initialization
//!
//! Wires a rotating file sink and a console sink onto the root logger of a
//! [`LoggerRegistry`], sharing one [`Formatter`], then applies the per-logger
//! level overrides from [`LoggingConfig`].
//!
//! Setup is repeatable: sinks left on the root by an earlier call are
//! removed before the new ones are attached.

use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::bridge::RegistryLayer;
use crate::domain::{LogLevel, LoggingConfig};
use crate::error::{LoggingError, Result};
use crate::formatter::Formatter;
use crate::registry::LoggerRegistry;
use crate::sink::{ConsoleSink, RotatingFileSink, Sink};

static SUBSCRIBER: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Set up logging to `log_file_path` and stdout at `minimum_level`, with the
/// default rotation policy and overrides.
pub fn initialize(
    registry: &LoggerRegistry,
    log_file_path: impl AsRef<Path>,
    minimum_level: LogLevel,
) -> Result<()> {
    let config = LoggingConfig::default()
        .with_log_file(log_file_path.as_ref())
        .with_level(minimum_level);
    initialize_with(registry, &config)
}

/// Set up logging from a full configuration, console on stdout
pub fn initialize_with(registry: &LoggerRegistry, config: &LoggingConfig) -> Result<()> {
    initialize_with_console(registry, config, ConsoleSink::stdout())
}

/// Set up logging with a caller-provided console sink
///
/// Everything that can fail runs before the root logger is touched, so an
/// error leaves the previous configuration in place.
pub fn initialize_with_console(
    registry: &LoggerRegistry,
    config: &LoggingConfig,
    console: ConsoleSink,
) -> Result<()> {
    ensure_log_dir(&config.log_file)?;

    let formatter = Formatter::default();
    let sink_level = config.sink_level();

    let file_sink = RotatingFileSink::new(
        &config.log_file,
        config.max_file_size,
        config.backup_count,
    )?;
    file_sink.set_level(sink_level);
    file_sink.set_formatter(formatter.clone());

    console.set_level(sink_level);
    console.set_formatter(formatter);

    let root = registry.root();
    root.set_level(config.level);

    let replaced = root.clear_sinks();
    if replaced > 0 {
        debug!("Replaced {} previously attached root sinks", replaced);
    }
    root.add_sink(Arc::new(file_sink));
    root.add_sink(Arc::new(console));

    for entry in &config.overrides {
        registry
            .logger(&entry.logger)
            .set_level(entry.applied_level(config.level));
    }

    root.set_propagate(false);

    info!(
        log_file = %config.log_file.display(),
        level = %config.level,
        overrides = config.overrides.len(),
        "Logging initialized"
    );
    Ok(())
}

/// Initialize the process-wide registry and route `tracing` events into it.
///
/// The global subscriber is installed on the first call only; later calls
/// just reconfigure the sinks. If that install failed, every call reports it.
pub fn init_global(config: &LoggingConfig) -> Result<&'static LoggerRegistry> {
    let registry = LoggerRegistry::global();
    initialize_with(registry, config)?;

    SUBSCRIBER
        .get_or_init(|| {
            tracing_subscriber::registry()
                .with(RegistryLayer::new(registry.clone()))
                .try_init()
                .map_err(|e| e.to_string())
        })
        .clone()
        .map_err(LoggingError::SubscriberInstall)?;

    Ok(registry)
}

/// Create the parent directory of `log_file` if there is one and it is missing
fn ensure_log_dir(log_file: &Path) -> Result<()> {
    let Some(dir) = log_file.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!("Created log directory {:?}", dir);
    Ok(())
}
