//! Output sinks
//!
//! A sink owns a level threshold and a [`Formatter`]; loggers hand it every
//! record that passed their own level check and the sink decides whether to
//! write it.

mod console;
mod memory;
mod rotating_file;

pub use console::ConsoleSink;
pub use memory::MemorySink;
pub use rotating_file::{RotatingFile, RotatingFileSink};

use parking_lot::RwLock;
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::warn;

use crate::domain::{LogLevel, LogRecord};
use crate::formatter::Formatter;

/// Destination for formatted log records
pub trait Sink: Send + Sync {
    fn level(&self) -> LogLevel;

    fn set_level(&self, level: LogLevel);

    fn set_formatter(&self, formatter: Formatter);

    /// Write a record unconditionally
    fn emit(&self, record: &LogRecord) -> io::Result<()>;

    /// Write a record if it meets this sink's threshold.
    ///
    /// Write failures are reported and swallowed; a broken sink never takes
    /// the caller down.
    fn handle(&self, record: &LogRecord) {
        if record.level < self.level() {
            return;
        }
        if let Err(e) = self.emit(record) {
            warn!(logger = %record.logger, "Failed to write log record: {}", e);
        }
    }
}

/// Threshold and formatter shared by every sink implementation
#[derive(Debug)]
pub(crate) struct SinkState {
    level: AtomicU8,
    formatter: RwLock<Formatter>,
}

impl SinkState {
    pub(crate) fn new(level: LogLevel) -> Self {
        Self {
            level: AtomicU8::new(level.to_u8()),
            formatter: RwLock::new(Formatter::default()),
        }
    }

    pub(crate) fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub(crate) fn set_level(&self, level: LogLevel) {
        self.level.store(level.to_u8(), Ordering::Relaxed);
    }

    pub(crate) fn set_formatter(&self, formatter: Formatter) {
        *self.formatter.write() = formatter;
    }

    /// Format a record into a newline-terminated line
    pub(crate) fn render(&self, record: &LogRecord) -> String {
        let mut line = self.formatter.read().format(record);
        line.push('\n');
        line
    }
}

impl Default for SinkState {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}
