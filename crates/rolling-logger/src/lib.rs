//! Rolling Logger
//!
//! Installs a global `tracing` subscriber that writes to a size-rotated
//! file and keeps the latest lines in memory. Records emitted through the
//! `log` facade are forwarded as well.

mod buffer;
mod file;

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

pub use buffer::LineBuffer;
pub use file::RollingFile;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Rotate the live file once it would exceed this size
    pub max_file_bytes: u64,
    /// Rotated files to keep
    pub max_files: usize,
    /// Lines kept for `recent_lines`
    pub buffer_lines: usize,
    pub level: tracing::Level,
    /// Mirror every record to stderr
    pub echo_stderr: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 2 * 1024 * 1024,
            max_files: 5,
            buffer_lines: 500,
            level: tracing::Level::INFO,
            echo_stderr: false,
        }
    }
}

struct Inner {
    file: RollingFile,
    buffer: LineBuffer,
    echo_stderr: bool,
}

/// `MakeWriter` handed to the fmt subscriber; clones share one file
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingWriter {
    pub fn new(log_dir: &Path, app_name: &str, config: &LoggerConfig) -> io::Result<Self> {
        let file = RollingFile::open(log_dir, app_name, config.max_file_bytes, config.max_files)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                file,
                buffer: LineBuffer::new(config.buffer_lines),
                echo_stderr: config.echo_stderr,
            })),
        })
    }

    pub fn recent_lines(&self, n: usize) -> Vec<String> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.buffer.recent(n)
    }
}

impl io::Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.file.write_record(buf)?;
        let text = String::from_utf8_lossy(buf);
        inner.buffer.push(&text);
        if inner.echo_stderr {
            eprint!("{}", text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

/// Initialize the global logger writing `<log_dir>/<app_name>.log`
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    init_with_config(log_dir, app_name, LoggerConfig::default())
}

pub fn init_with_config(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: LoggerConfig,
) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("logger already initialized".to_string());
    }
    let writer = RollingWriter::new(log_dir.as_ref(), app_name, &config)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_target(true)
        .with_max_level(config.level)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    LOGGER
        .set(writer)
        .map_err(|_| "logger already initialized".to_string())?;
    log::info!("{} logging to {}", app_name, log_dir.as_ref().display());
    Ok(())
}

fn ensure_initialized() -> Result<(), String> {
    LOGGER
        .get()
        .map(|_| ())
        .ok_or_else(|| "logger not initialized".to_string())
}

pub fn info(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Latest `n` formatted lines, oldest first; empty before `init_logger`
pub fn recent_lines(n: usize) -> Vec<String> {
    LOGGER.get().map(|w| w.recent_lines(n)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_writer_feeds_file_and_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggerConfig {
            buffer_lines: 2,
            ..Default::default()
        };
        let writer = RollingWriter::new(dir.path(), "admin", &config).unwrap();

        let mut handle = writer.make_writer();
        handle.write_all(b"first\n").unwrap();
        handle.write_all(b"second\nthird\n").unwrap();
        handle.flush().unwrap();

        assert_eq!(writer.recent_lines(5), vec!["second", "third"]);
        let content = std::fs::read_to_string(dir.path().join("admin.log")).unwrap();
        assert_eq!(content, "first\nsecond\nthird\n");
    }

    #[test]
    fn test_global_logger() {
        let dir = tempfile::tempdir().unwrap();
        assert!(info("dropped").is_err());

        init_logger(dir.path(), "global").unwrap();
        info("order saved").unwrap();
        log::warn!("via log facade");

        let lines = recent_lines(10);
        assert!(lines.iter().any(|l| l.contains("order saved")), "{:?}", lines);
        assert!(lines.iter().any(|l| l.contains("via log facade")), "{:?}", lines);
        assert!(init_logger(dir.path(), "global").is_err());
    }
}
