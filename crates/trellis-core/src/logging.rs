//! Tracing subscriber setup.
//!
//! The TUI owns stdout/stderr while running, so logs go to a file under
//! TRELLIS_HOME (or nowhere). `RUST_LOG` overrides the configured level.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Builds the filter: `RUST_LOG` if set and valid, else the configured level.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber.
///
/// With `log_file` set, events are written there through a non-blocking
/// appender; keep the returned guard alive until exit so buffered lines are
/// flushed. Without a file, events are discarded.
///
/// Calling this twice is harmless: the second subscriber is not installed.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(config: &LogConfig, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(config);

    let Some(path) = log_file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init();
        return Ok(None);
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "trellis.log".into(), |name| name.to_os_string());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_init_creates_log_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("trellis.log");

        let guard = init(&LogConfig::default(), Some(&path)).unwrap();

        assert!(guard.is_some());
        assert!(dir.path().join("logs").is_dir());
    }
}
