//! Size-capped log file with numbered backups
//!
//! The active file is `app.log`; rotated copies are `app.log.1` (newest)
//! through `app.log.N` (oldest). Rolling over shifts every backup up by one
//! and drops whatever would land past `N`. Without backups the active file
//! just keeps growing.

use parking_lot::Mutex;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{Sink, SinkState};
use crate::domain::{LogLevel, LogRecord};
use crate::error::LoggingError;
use crate::formatter::Formatter;

/// The file half of the sink: tracks size and performs rollover
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    file: File,
    current_size: u64,
    max_bytes: u64,
    backup_count: usize,
}

impl RotatingFile {
    /// Open (or create) the active file in append mode.
    ///
    /// Rotation needs both a cap and somewhere to archive to: with
    /// `max_bytes == 0` or `backup_count == 0` the file is never rolled over.
    pub fn open(
        path: impl Into<PathBuf>,
        max_bytes: u64,
        backup_count: usize,
    ) -> Result<Self, LoggingError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggingError::OpenLogFile {
                path: path.clone(),
                source,
            })?;

        let current_size = file
            .metadata()
            .map_err(|source| LoggingError::OpenLogFile {
                path: path.clone(),
                source,
            })?
            .len();

        Ok(Self {
            path,
            file,
            current_size,
            max_bytes,
            backup_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes counted towards the next rollover
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Path of the `index`-th backup (`app.log.<index>`)
    pub fn backup_path(&self, index: usize) -> PathBuf {
        backup_path(&self.path, index)
    }

    /// Append one already-formatted line, rolling over first if it would
    /// push a non-empty file past the cap.
    ///
    /// A failed rollover does not lose the line: it goes to whatever file is
    /// open, and the next attempt waits for another cap's worth of bytes.
    pub fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        if self.should_rotate(line.len() as u64) {
            if let Err(e) = self.rotate() {
                warn!("Failed to rotate log file {:?}: {}", self.path, e);
                self.current_size = 0;
            }
        }

        self.file.write_all(line)?;
        self.file.flush()?;
        self.current_size += line.len() as u64;

        Ok(())
    }

    fn should_rotate(&self, incoming: u64) -> bool {
        self.max_bytes > 0
            && self.backup_count > 0
            && self.current_size > 0
            && self.current_size + incoming > self.max_bytes
    }

    /// Archive the active file and start a fresh one
    pub fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backup_count == 0 {
            return Ok(());
        }

        debug!("Rotating log file {:?}", self.path);

        for index in (1..self.backup_count).rev() {
            let src = self.backup_path(index);
            if src.exists() {
                let dst = self.backup_path(index + 1);
                remove_if_exists(&dst)?;
                fs::rename(&src, &dst)?;
            }
        }

        let first = self.backup_path(1);
        remove_if_exists(&first)?;
        if self.path.exists() {
            fs::rename(&self.path, &first)?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.current_size = 0;

        Ok(())
    }
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Sink writing formatted records into a [`RotatingFile`].
///
/// Formatting happens outside the lock; the size check, rollover and write
/// happen under it, so concurrent writers never see a torn line.
#[derive(Debug)]
pub struct RotatingFileSink {
    state: SinkState,
    file: Mutex<RotatingFile>,
}

impl RotatingFileSink {
    pub fn new(
        path: impl Into<PathBuf>,
        max_bytes: u64,
        backup_count: usize,
    ) -> Result<Self, LoggingError> {
        Ok(Self {
            state: SinkState::default(),
            file: Mutex::new(RotatingFile::open(path, max_bytes, backup_count)?),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.file.lock().path().to_path_buf()
    }
}

impl Sink for RotatingFileSink {
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
        self.file.lock().write_line(line.as_bytes())
    }
}
