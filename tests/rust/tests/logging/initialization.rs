//! Directory creation, sink wiring and line format

use applog::{
    initialize, initialize_with_console, LogLevel, LoggerRegistry, LoggingConfig, LoggingError,
};
use pretty_assertions::assert_eq;
use tests::{assert_log_line, Harness};

#[test]
fn test_initialize_creates_missing_log_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_file = temp_dir.path().join("nested").join("logs").join("app.log");
    let registry = LoggerRegistry::new();

    initialize(&registry, &log_file, LogLevel::Info).unwrap();

    assert!(log_file.parent().unwrap().is_dir());
    assert!(log_file.is_file());
}

#[test]
fn test_initialize_accepts_existing_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Info);
    let again = Harness::new(temp_dir.path(), LogLevel::Info);

    assert_eq!(harness.log_file, again.log_file);
    assert!(harness.log_file.is_file());
}

#[test]
fn test_directory_creation_failure_is_returned() {
    let temp_dir = tempfile::tempdir().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "plain file").unwrap();
    let registry = LoggerRegistry::new();

    let err = initialize(&registry, blocker.join("logs").join("app.log"), LogLevel::Info)
        .unwrap_err();

    assert!(
        matches!(err, LoggingError::CreateDirectory { .. }),
        "Unexpected error: {err}"
    );
    assert_eq!(registry.root().sink_count(), 0);
}

#[test]
fn test_record_at_level_reaches_file_and_console() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Info);

    harness.registry.logger("billing.invoices").info("invoice 42 sent");

    let file_lines = harness.file_lines();
    let console_lines = harness.console.lines();
    assert_eq!(file_lines.len(), 1);
    assert_eq!(console_lines.len(), 1);
    assert_log_line(&file_lines[0], "INFO", "billing.invoices", "invoice 42 sent");
    assert_eq!(file_lines, console_lines);
}

#[test]
fn test_record_below_level_reaches_neither_sink() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Warning);

    let logger = harness.registry.logger("billing.invoices");
    logger.debug("cache miss");
    logger.info("invoice 42 sent");

    assert!(harness.file_lines().is_empty());
    assert!(harness.console.lines().is_empty());
}

#[test]
fn test_root_logger_records_use_root_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Info);

    harness.registry.root().critical("disk full");

    assert_log_line(&harness.file_lines()[0], "CRITICAL", "root", "disk full");
}

#[test]
fn test_reinitializing_replaces_sinks() {
    let temp_dir = tempfile::tempdir().unwrap();
    let first = Harness::new(temp_dir.path(), LogLevel::Info);
    let second_config = LoggingConfig::default()
        .with_log_file(temp_dir.path().join("other").join("app.log"))
        .with_level(LogLevel::Info);
    let second = Harness::attach(first.registry.clone(), second_config);

    second.registry.logger("app").error("after reinit");

    assert!(first.file_lines().is_empty());
    assert!(first.console.lines().is_empty());
    assert_eq!(second.file_lines().len(), 1);
    assert_eq!(second.console.lines().len(), 1);
    assert_eq!(second.registry.root().sink_count(), 2);
}

#[test]
fn test_failed_reinitialize_leaves_previous_setup_untouched() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Info);

    // The parent exists, but the log path is itself a directory
    let config = LoggingConfig::default()
        .with_log_file(temp_dir.path())
        .with_level(LogLevel::Critical);
    let err = initialize_with_console(&harness.registry, &config, harness.console.console())
        .unwrap_err();
    assert!(
        matches!(err, LoggingError::OpenLogFile { .. }),
        "Unexpected error: {err}"
    );

    assert_eq!(harness.registry.root().level(), Some(LogLevel::Info));
    assert_eq!(harness.registry.root().sink_count(), 2);

    harness.registry.logger("app").info("still at info");
    let lines = harness.file_lines();
    assert_eq!(lines.len(), 1);
    assert_log_line(&lines[0], "INFO", "app", "still at info");
    assert_eq!(harness.console.lines(), lines);
}
