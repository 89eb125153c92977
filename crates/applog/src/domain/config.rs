//! Logging configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use super::LogLevel;
use crate::error::LoggingError;

/// Default active log file
pub const DEFAULT_LOG_FILE: &str = "logs/app.log";

/// Default size cap of the active file before it is rotated (5 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Default number of rotated backups kept next to the active file
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Environment variable overriding [`LoggingConfig::log_file`]
pub const ENV_LOG_FILE: &str = "APP_LOG_FILE";
/// Environment variable overriding [`LoggingConfig::level`]
pub const ENV_LOG_LEVEL: &str = "APP_LOG_LEVEL";
/// Environment variable appending to [`LoggingConfig::overrides`]
/// (`name=level` or `name>=level`, comma separated)
pub const ENV_LOG_OVERRIDES: &str = "APP_LOG_OVERRIDES";

/// What an override is for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideKind {
    /// Set the logger to exactly this level, even below the minimum
    #[default]
    Elevate,
    /// Quiet the logger; it never gets more verbose than the minimum
    Suppress,
}

/// Per-logger level override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOverride {
    pub logger: String,
    pub level: LogLevel,
    #[serde(default)]
    pub kind: OverrideKind,
}

impl LevelOverride {
    pub fn new(logger: impl Into<String>, level: LogLevel) -> Self {
        Self {
            logger: logger.into(),
            level,
            kind: OverrideKind::Elevate,
        }
    }

    pub fn suppress(logger: impl Into<String>, level: LogLevel) -> Self {
        Self {
            kind: OverrideKind::Suppress,
            ..Self::new(logger, level)
        }
    }

    /// Parse a `name=level` (elevate) or `name>=level` (suppress) directive
    pub fn parse(directive: &str) -> Result<Self, LoggingError> {
        let (name, level) = directive
            .split_once('=')
            .ok_or_else(|| LoggingError::InvalidOverride(directive.to_string()))?;
        let (name, kind) = match name.strip_suffix('>') {
            Some(name) => (name.trim(), OverrideKind::Suppress),
            None => (name.trim(), OverrideKind::Elevate),
        };
        if name.is_empty() {
            return Err(LoggingError::InvalidOverride(directive.to_string()));
        }
        Ok(Self {
            logger: name.to_string(),
            level: level.parse()?,
            kind,
        })
    }

    /// Level to set on the logger when the root sits at `minimum`
    pub fn applied_level(&self, minimum: LogLevel) -> LogLevel {
        match self.kind {
            OverrideKind::Elevate => self.level,
            OverrideKind::Suppress => self.level.max(minimum),
        }
    }
}

/// Overrides applied by default: quiet the charting library and the report
/// controller, trace the issue service.
pub fn default_overrides() -> Vec<LevelOverride> {
    vec![
        LevelOverride::suppress("matplotlib", LogLevel::Warning),
        LevelOverride::suppress("matplotlib.font_manager", LogLevel::Warning),
        LevelOverride::suppress("controllers.report_controller", LogLevel::Warning),
        LevelOverride::new("services.issue_service", LogLevel::Debug),
    ]
}

/// Configuration consumed by [`crate::initialize_with`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Active log file; its parent directory is created on setup
    pub log_file: PathBuf,

    /// Minimum level for the root logger; sinks also admit finer elevations
    pub level: LogLevel,

    /// Maximum file size before rotation (bytes, 0 disables rotation)
    pub max_file_size: u64,

    /// Number of rotated files to keep
    pub backup_count: usize,

    /// Applied in order, so later entries for the same logger win
    pub overrides: Vec<LevelOverride>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            level: LogLevel::Info,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            backup_count: DEFAULT_BACKUP_COUNT,
            overrides: default_overrides(),
        }
    }
}

impl LoggingConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `APP_LOG_FILE`: path of the active log file
    /// - `APP_LOG_LEVEL`: minimum level (debug, info, warning, error, critical)
    /// - `APP_LOG_OVERRIDES`: extra `name=level` elevations or `name>=level`
    ///   suppressions, comma separated
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoggingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
            config.log_file = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.level = level.parse()?;
        }
        if let Some(directives) = lookup(ENV_LOG_OVERRIDES) {
            for directive in directives.split(',').filter(|d| !d.trim().is_empty()) {
                config.overrides.push(LevelOverride::parse(directive)?);
            }
        }

        Ok(config)
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_override(mut self, logger: impl Into<String>, level: LogLevel) -> Self {
        self.overrides.push(LevelOverride::new(logger, level));
        self
    }

    pub fn with_rotation(mut self, max_file_size: u64, backup_count: usize) -> Self {
        self.max_file_size = max_file_size;
        self.backup_count = backup_count;
        self
    }

    pub fn with_suppression(mut self, logger: impl Into<String>, level: LogLevel) -> Self {
        self.overrides.push(LevelOverride::suppress(logger, level));
        self
    }

    /// Level the sinks must accept so that every elevated logger reaches them
    pub fn sink_level(&self) -> LogLevel {
        self.overrides
            .iter()
            .map(|o| o.applied_level(self.level))
            .fold(self.level, LogLevel::min)
    }
}
