//! Error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown log level: {0:?}")]
    InvalidLevel(String),

    #[error("invalid logger override {0:?}, expected name=level")]
    InvalidOverride(String),

    #[error("invalid timestamp format {0:?}")]
    InvalidDateFormat(String),

    #[error("failed to install global tracing subscriber: {0}")]
    SubscriberInstall(String),
}

pub type Result<T> = std::result::Result<T, LoggingError>;
