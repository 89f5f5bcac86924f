//! Logging setup.
//!
//! The TUI owns the terminal, so it only ever logs to a file (`--log-file`).
//! The one-shot `--json` and `--list-drives` modes log to stderr, keeping
//! stdout clean for their output. `RUST_LOG` overrides the default `info`
//! filter in both cases.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Create the log file's directory and truncate the file.
///
/// Returns the directory and file name the appender writes to.
fn prepare_log_file(path: &Path) -> Result<(PathBuf, OsString), io::Error> {
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("log path has no file name: {}", path.display()),
            )
        })?
        .to_os_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&dir)?;
    // Each session starts with an empty log
    fs::write(dir.join(&file_name), "")?;

    Ok((dir, file_name))
}

/// Log to `path` through a non-blocking writer.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the log file
/// cannot be cleared.
pub fn init_file_logging(path: &Path) -> Result<LoggingGuard, io::Error> {
    let (dir, file_name) = prepare_log_file(path)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Log to stderr (non-interactive modes).
pub fn init_stderr_logging() {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_creates_directory_and_clears_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs/nested/report.log");

        let (dir, file_name) = prepare_log_file(&path).unwrap();
        assert_eq!(dir, temp.path().join("logs/nested"));
        assert_eq!(file_name, "report.log");
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        fs::write(&path, "old log data").unwrap();
        prepare_log_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "", "File should be cleared");
    }

    #[test]
    fn test_path_without_file_name_is_rejected() {
        let path = Path::new("..");
        assert!(prepare_log_file(path).is_err());
    }
}
