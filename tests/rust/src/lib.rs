//! Shared test utilities and fixtures for AppLog integration tests.

use applog::{initialize_with_console, ConsoleSink, LogLevel, LoggerRegistry, LoggingConfig};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// In-memory stand-in for stdout; clones share the same buffer
#[derive(Clone, Default)]
pub struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn console(&self) -> ConsoleSink {
        ConsoleSink::with_writer(self.clone())
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A registry initialized against a log file inside `dir`, console captured
pub struct Harness {
    pub registry: LoggerRegistry,
    pub console: CaptureBuffer,
    pub log_file: PathBuf,
}

impl Harness {
    pub fn new(dir: &Path, level: LogLevel) -> Self {
        Self::with_config(
            LoggingConfig::default()
                .with_log_file(dir.join("logs").join("app.log"))
                .with_level(level),
        )
    }

    pub fn with_config(config: LoggingConfig) -> Self {
        Self::attach(LoggerRegistry::new(), config)
    }

    /// Initialize an existing registry (e.g. one already placed below an upstream)
    pub fn attach(registry: LoggerRegistry, config: LoggingConfig) -> Self {
        let console = CaptureBuffer::new();
        initialize_with_console(&registry, &config, console.console())
            .expect("Failed to initialize logging");
        Self {
            registry,
            console,
            log_file: config.log_file,
        }
    }

    pub fn file_lines(&self) -> Vec<String> {
        read_lines(&self.log_file)
    }
}

/// Lines of a file, empty if it does not exist
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Path of the `index`-th rotated backup of `log_file`
pub fn backup(log_file: &Path, index: usize) -> PathBuf {
    let mut name = log_file.as_os_str().to_owned();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// Assert `line` is `YYYY-MM-DD HH:MM:SS - LEVEL - logger - message`
pub fn assert_log_line(line: &str, level: &str, logger: &str, message: &str) {
    assert!(line.len() > 19, "Line too short: {line:?}");
    let (timestamp, rest) = line.split_at(19);
    assert!(
        NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok(),
        "Bad timestamp in {line:?}"
    );
    assert_eq!(rest, format!(" - {level} - {logger} - {message}"));
}
