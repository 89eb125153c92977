//! In-memory sink, mostly for tests and for embedding hosts that want to
//! inspect what was logged.

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

use super::{Sink, SinkState};
use crate::domain::{LogLevel, LogRecord};
use crate::formatter::Formatter;

/// Collects formatted lines; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    state: SinkState,
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatted lines so far, without trailing newlines
    pub fn lines(&self) -> Vec<String> {
        self.inner.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn level(&self) -> LogLevel {
        self.inner.state.level()
    }

    fn set_level(&self, level: LogLevel) {
        self.inner.state.set_level(level);
    }

    fn set_formatter(&self, formatter: Formatter) {
        self.inner.state.set_formatter(formatter);
    }

    fn emit(&self, record: &LogRecord) -> io::Result<()> {
        let mut line = self.inner.state.render(record);
        line.pop();
        self.inner.lines.lock().push(line);
        Ok(())
    }
}
