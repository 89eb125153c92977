//! Fixed per-logger overrides

use applog::{LogLevel, LoggingConfig};
use pretty_assertions::assert_eq;
use tests::{assert_log_line, Harness};

#[test]
fn test_report_controller_is_quieted() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Info);

    let logger = harness.registry.logger("controllers.report_controller");
    logger.info("rendering report");
    logger.warning("template missing");

    let lines = harness.file_lines();
    assert_eq!(lines.len(), 1);
    assert_log_line(
        &lines[0],
        "WARNING",
        "controllers.report_controller",
        "template missing",
    );
    assert_eq!(harness.console.lines(), lines);
}

#[test]
fn test_issue_service_is_elevated_to_debug() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Info);

    harness
        .registry
        .logger("services.issue_service")
        .debug("fetching open issues");

    let lines = harness.file_lines();
    assert_eq!(lines.len(), 1);
    assert_log_line(
        &lines[0],
        "DEBUG",
        "services.issue_service",
        "fetching open issues",
    );
    assert_eq!(harness.console.lines().len(), 1);
}

#[test]
fn test_elevation_does_not_leak_to_other_loggers() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Info);

    harness.registry.logger("services").debug("parent stays at info");
    harness
        .registry
        .logger("services.user_service")
        .debug("sibling stays at info");

    assert!(harness.file_lines().is_empty());
}

#[test]
fn test_charting_library_is_suppressed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Debug);

    harness.registry.logger("matplotlib").info("backend selected");
    harness
        .registry
        .logger("matplotlib.font_manager")
        .debug("findfont: scoring");
    harness.registry.logger("matplotlib.pyplot").info("inherits warning");
    harness
        .registry
        .logger("matplotlib.font_manager")
        .error("font cache corrupt");

    let lines = harness.file_lines();
    assert_eq!(lines.len(), 1);
    assert_log_line(
        &lines[0],
        "ERROR",
        "matplotlib.font_manager",
        "font cache corrupt",
    );
}

#[test]
fn test_configured_overrides_are_applied_in_order() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig::default()
        .with_log_file(temp_dir.path().join("app.log"))
        .with_override("controllers.report_controller", LogLevel::Info)
        .with_override("db", LogLevel::Error);
    let harness = Harness::with_config(config);

    harness
        .registry
        .logger("controllers.report_controller")
        .info("now visible");
    harness.registry.logger("db.pool").warning("hidden");

    let lines = harness.file_lines();
    assert_eq!(lines.len(), 1);
    assert_log_line(
        &lines[0],
        "INFO",
        "controllers.report_controller",
        "now visible",
    );
}

#[test]
fn test_suppressed_loggers_stay_below_a_stricter_minimum() {
    let temp_dir = tempfile::tempdir().unwrap();
    let harness = Harness::new(temp_dir.path(), LogLevel::Error);

    for name in [
        "matplotlib",
        "matplotlib.font_manager",
        "controllers.report_controller",
        "other",
    ] {
        harness.registry.logger(name).warning("below the minimum");
    }
    harness
        .registry
        .logger("controllers.report_controller")
        .error("report failed");

    let lines = harness.file_lines();
    assert_eq!(lines.len(), 1);
    assert_log_line(
        &lines[0],
        "ERROR",
        "controllers.report_controller",
        "report failed",
    );
    assert_eq!(harness.console.lines(), lines);
}
