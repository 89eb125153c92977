//! Logging domain types

pub mod config;
pub mod level;
pub mod record;

pub use config::{default_overrides, LevelOverride, LoggingConfig, OverrideKind};
pub use level::LogLevel;
pub use record::LogRecord;
