//! Console sink - writes formatted lines to stdout or any writer

use parking_lot::Mutex;
use std::io::{self, Write};

use super::{Sink, SinkState};
use crate::domain::{LogLevel, LogRecord};
use crate::formatter::Formatter;

pub struct ConsoleSink {
    state: SinkState,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Sink writing to the process's standard output
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Sink writing to an arbitrary stream (e.g. a capture buffer in tests)
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            state: SinkState::default(),
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("level", &self.state.level())
            .finish_non_exhaustive()
    }
}

impl Sink for ConsoleSink {
    fn level(&self) -> LogLevel {
        self.state.level()
    }

    fn set_level(&self, level: LogLevel) {
        self.state.set_level(level);
    }

    fn set_formatter(&self, formatter: Formatter) {
        self.state.set_formatter(formatter);
    }

    fn emit(&self, record: &LogRecord) -> io::Result<()> {
        let line = self.state.render(record);
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}
