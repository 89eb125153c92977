//! Line formatter shared by all sinks
//!
//! Produces `<timestamp> - <LEVEL> - <logger> - <message>`.

use chrono::format::{Item, StrftimeItems};

use crate::domain::LogRecord;
use crate::error::LoggingError;

/// Default timestamp format (one-second resolution, local time)
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    date_format: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom strftime pattern for the timestamp column
    pub fn with_date_format(
        mut self,
        date_format: impl Into<String>,
    ) -> Result<Self, LoggingError> {
        let date_format = date_format.into();
        if StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error)) {
            return Err(LoggingError::InvalidDateFormat(date_format));
        }
        self.date_format = date_format;
        Ok(self)
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Render a record as a single line, without the trailing newline
    pub fn format(&self, record: &LogRecord) -> String {
        format!(
            "{} - {} - {} - {}",
            record.timestamp.format(&self.date_format),
            record.level.as_str(),
            record.logger,
            record.message
        )
    }
}
