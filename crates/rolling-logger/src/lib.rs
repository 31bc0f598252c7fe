//! Rolling Logger
//!
//! File logger for the app built on `tracing-subscriber`.
//! - Size-rotated files: `{app}.log`, `{app}.log.1` .. `{app}.log.{MAX_BACKUPS}`
//! - Last `BUFFER_LINES` lines kept in memory for an in-app log viewer
//! - `log` macros are bridged, so library crates can keep using `log::info!`

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

/// Rotate once the current file would grow past this size
pub const MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Number of rotated files kept next to the current one
pub const MAX_BACKUPS: usize = 3;
/// Lines kept in the in-memory circular buffer
pub const BUFFER_LINES: usize = 500;

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

struct Inner {
    dir: PathBuf,
    app_name: String,
    file: Option<File>,
    written: u64,
    max_bytes: u64,
    max_backups: usize,
    buffer: VecDeque<String>,
    capacity: usize,
    partial: String,
}

impl Inner {
    fn current_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}.log.{}", self.app_name, n))
    }

    fn rotate(&mut self) -> io::Result<()> {
        // Close before renaming (required on Windows)
        self.file = None;

        // Size accounting restarts even if the shuffle below fails
        self.written = 0;

        // The current file may have been removed from outside the process
        let current = self.current_path();
        if current.exists() {
            if self.max_backups == 0 {
                fs::remove_file(&current)?;
            } else {
                let oldest = self.backup_path(self.max_backups);
                if oldest.exists() {
                    fs::remove_file(&oldest)?;
                }
                for n in (1..self.max_backups).rev() {
                    let from = self.backup_path(n);
                    if from.exists() {
                        fs::rename(&from, self.backup_path(n + 1))?;
                    }
                }
                fs::rename(&current, self.backup_path(1))?;
            }
        }

        self.file = Some(open_append(&current)?);
        Ok(())
    }

    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        let len = buf.len() as u64;
        if self.written > 0 && self.written + len > self.max_bytes {
            self.rotate()?;
        }
        if self.file.is_none() {
            self.file = Some(open_append(&self.current_path())?);
        }
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        self.written += len;
        self.remember(buf);
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.capacity == 0 {
            return;
        }
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            if self.buffer.len() == self.capacity {
                self.buffer.pop_front();
            }
            self.buffer.push_back(line.trim_end().to_string());
        }
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn lock_error() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "log writer lock poisoned")
}

/// Shared rolling writer, usable as a `tracing-subscriber` `MakeWriter`
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingWriter {
    pub fn new(dir: impl AsRef<Path>, app_name: &str) -> io::Result<Self> {
        Self::with_limits(dir, app_name, MAX_FILE_BYTES, MAX_BACKUPS, BUFFER_LINES)
    }

    pub fn with_limits(
        dir: impl AsRef<Path>,
        app_name: &str,
        max_bytes: u64,
        max_backups: usize,
        buffer_lines: usize,
    ) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.log", app_name));
        let file = open_append(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                dir,
                app_name: app_name.to_string(),
                file: Some(file),
                written,
                max_bytes,
                max_backups,
                buffer: VecDeque::with_capacity(buffer_lines),
                capacity: buffer_lines,
                partial: String::new(),
            })),
        })
    }

    /// Path of the file currently written to
    pub fn log_path(&self) -> Option<PathBuf> {
        self.inner.lock().ok().map(|inner| inner.current_path())
    }

    /// Snapshot of the circular buffer, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.buffer.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Per-event handle handed out to the fmt layer
pub struct RollingHandle {
    inner: Arc<Mutex<Inner>>,
}

impl Write for RollingHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().map_err(|_| lock_error())?;
        inner.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock().map_err(|_| lock_error())?;
        match inner.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RollingHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global subscriber writing to `log_dir/{app_name}.log`.
///
/// Can only succeed once per process.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("Logger already initialized".to_string());
    }

    let writer = RollingWriter::new(log_dir, app_name)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_timer(LocalTimer);

    // Mirror to stderr in debug builds
    let console_layer = cfg!(debug_assertions).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_timer(LocalTimer)
    });

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    LOGGER
        .set(writer)
        .map_err(|_| "Logger already initialized".to_string())?;

    tracing::info!("{} logger started", app_name);
    Ok(())
}

fn ensure_init() -> Result<(), String> {
    LOGGER
        .get()
        .map(|_| ())
        .ok_or_else(|| "Logger not initialized".to_string())
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_init()?;
    tracing::error!("{}", msg);
    Ok(())
}

/// Recent lines of the global logger (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|w| w.recent_lines()).unwrap_or_default()
}

/// Current log file of the global logger
pub fn log_file() -> Option<PathBuf> {
    LOGGER.get().and_then(|w| w.log_path())
}
