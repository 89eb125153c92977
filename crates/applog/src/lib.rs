//! # AppLog
//!
//! Application logging setup over an explicit logger registry.
//!
//! ## Modules
//!
//! - `domain` - Levels, records and configuration
//! - `registry` - Named, hierarchical loggers with propagation
//! - `formatter` - `<timestamp> - <LEVEL> - <logger> - <message>` lines
//! - `sink` - Console, rotating file and in-memory sinks
//! - `setup` - The initializer wiring sinks and overrides together
//! - `bridge` - `tracing` layer feeding events into a registry
//!
//! ```no_run
//! use applog::{initialize, LogLevel, LoggerRegistry};
//!
//! let registry = LoggerRegistry::new();
//! initialize(&registry, "logs/app.log", LogLevel::Info)?;
//! registry.logger("services.issue_service").debug("loaded issues");
//! # Ok::<(), applog::LoggingError>(())
//! ```

pub mod bridge;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod registry;
pub mod setup;
pub mod sink;

pub use bridge::RegistryLayer;
pub use domain::*;
pub use error::{LoggingError, Result};
pub use formatter::Formatter;
pub use registry::{Logger, LoggerRegistry, ROOT_LOGGER};
pub use setup::{init_global, initialize, initialize_with, initialize_with_console};
pub use sink::{ConsoleSink, MemorySink, RotatingFile, RotatingFileSink, Sink};
