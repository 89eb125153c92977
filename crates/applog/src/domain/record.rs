use chrono::{DateTime, Local};

use super::LogLevel;

/// A single log event, as handed to sinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    /// Dotted name of the originating logger (`root` for the root logger)
    pub logger: String,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            logger: logger.into(),
            message: message.into(),
        }
    }

    /// Override the timestamp (used for deterministic formatting)
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
