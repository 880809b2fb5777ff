//! Opt-in file logging for hosts without a logger of their own.
//!
//! The library only emits records through the `log` facade, under `nudge*`
//! targets. Nothing here runs unless the host asks for it, and nothing here
//! touches the global max level on its own: a host that already installed a
//! logger keeps its configuration.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use nudge_core::AppUpdaterOptions;
use simplelog::{CombinedLogger, Config, ConfigBuilder, LevelFilter, WriteLogger};
use thiserror::Error;

pub const DEFAULT_MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;

const TARGET: &str = "nudge";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("A global logger is already installed")]
    AlreadyInstalled,
}

/// Log file handle that reopens its path when the file disappears, so a
/// rotated or deleted log keeps receiving records.
pub struct LogFile {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogFile {
    fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(open_append(path)?),
        })
    }

    fn handle(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.path.exists() {
            *file = open_append(&self.path)?;
        }
        Ok(file)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.handle()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

/// Keep the newer half of an oversized log, cut at a line boundary.
fn shrink_log(path: &Path, max_log_size: u64) {
    let oversized = std::fs::metadata(path).is_ok_and(|metadata| metadata.len() > max_log_size);
    if !oversized {
        return;
    }
    let Ok(contents) = std::fs::read(path) else {
        return;
    };

    let half = contents.len() / 2;
    let start = contents[half..]
        .iter()
        .position(|&byte| byte == b'\n')
        .map_or(half, |offset| half + offset + 1);
    let _ = std::fs::write(path, &contents[start..]);
}

/// Level for `nudge` records: everything with debug logging on, warnings and
/// errors otherwise.
#[must_use]
pub fn level_for(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str(TARGET)
        .build()
}

/// Build a logger that writes `nudge` records to `path`, for hosts that want
/// to add it to their own `CombinedLogger`.
///
/// # Errors
/// Returns [`LoggingError::Open`] when the file or its directory cannot be
/// created.
pub fn file_logger(
    path: &Path,
    debug_enabled: bool,
    max_log_size: u64,
) -> Result<Box<WriteLogger<LogFile>>, LoggingError> {
    shrink_log(path, max_log_size);
    let file = LogFile::open(path).map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriteLogger::new(level_for(debug_enabled), config(), file))
}

/// Install a file logger for `nudge` records as the process logger, using
/// `options.enable_debug_logging` to pick the level.
///
/// # Errors
/// Returns [`LoggingError::AlreadyInstalled`] when the host already set a
/// logger (its settings are left alone), or [`LoggingError::Open`] when the
/// file cannot be opened.
pub fn init_file_logging(path: &Path, options: &AppUpdaterOptions) -> Result<(), LoggingError> {
    let logger = file_logger(path, options.enable_debug_logging, DEFAULT_MAX_LOG_SIZE)?;
    CombinedLogger::init(vec![logger]).map_err(|_| LoggingError::AlreadyInstalled)?;
    log::debug!(target: TARGET, "File logging initialized at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use log::{Level, Log, Record};

    use super::*;

    fn emit(logger: &dyn Log, target: &str, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .target(target)
                .level(level)
                .args(format_args!("{message}"))
                .build(),
        );
        logger.flush();
    }

    #[test]
    fn quiet_logger_keeps_warnings_only() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("logs").join("nudge.log");
        let logger = file_logger(&path, false, DEFAULT_MAX_LOG_SIZE)
            .expect("logger should open its file");

        emit(logger.as_ref(), "nudge::updater", Level::Debug, "decision detail");
        emit(logger.as_ref(), "nudge::reminder", Level::Warn, "store degraded");

        let contents = std::fs::read_to_string(&path).expect("log file should be readable");
        assert!(contents.contains("store degraded"));
        assert!(!contents.contains("decision detail"));
    }

    #[test]
    fn debug_logger_skips_host_targets() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("nudge.log");
        let logger =
            file_logger(&path, true, DEFAULT_MAX_LOG_SIZE).expect("logger should open its file");

        emit(logger.as_ref(), "nudge::updater", Level::Debug, "decision detail");
        emit(logger.as_ref(), "host_app", Level::Warn, "host warning");

        let contents = std::fs::read_to_string(&path).expect("log file should be readable");
        assert!(contents.contains("decision detail"));
        assert!(!contents.contains("host warning"));
    }

    #[test]
    fn building_a_logger_leaves_global_level_alone() {
        let before = log::max_level();
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");

        let _logger = file_logger(&temp_dir.path().join("nudge.log"), false, 1024)
            .expect("logger should open its file");

        assert_eq!(log::max_level(), before);
    }

    #[test]
    fn log_file_reopens_after_deletion() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("nudge.log");
        let mut file = LogFile::open(&path).expect("log file should open");

        file.write_all(b"before\n").expect("first write should succeed");
        std::fs::remove_file(&path).expect("log file should be removable");
        file.write_all(b"after\n").expect("write should reopen the file");

        assert_eq!(
            std::fs::read_to_string(&path).expect("log file should be readable"),
            "after\n"
        );
    }

    #[test]
    fn shrink_log_drops_older_half() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("nudge.log");
        std::fs::write(&path, "a1\na2\na3\na4\nb1\nb2\nb3\nb4\n").expect("log should be written");

        shrink_log(&path, 8);

        let kept = std::fs::read_to_string(&path).expect("log should be readable");
        assert!(kept.ends_with("b4\n"));
        assert!(!kept.contains("a1"));
        assert!(kept.len() < 24);
    }

    #[test]
    fn shrink_log_ignores_small_or_missing_files() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("nudge.log");

        shrink_log(&path, 8);
        assert!(!path.exists());

        std::fs::write(&path, "ok\n").expect("log should be written");
        shrink_log(&path, 8);
        assert_eq!(std::fs::read_to_string(&path).expect("log should be readable"), "ok\n");
    }

    #[test]
    fn level_follows_debug_flag() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Warn);
    }
}
