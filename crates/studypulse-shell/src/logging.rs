//! Tracing setup: `RUST_LOG` wins over the configured level. Output normally
//! goes to a daily log file so it never interleaves with the prompt.

use std::path::PathBuf;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "studypulse.log";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Daily rolling files under the given directory.
    File(PathBuf),
    /// Standard error; nothing touches the disk.
    Stderr,
}

fn writer(sink: &LogSink) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    Ok(match sink {
        LogSink::File(logs_dir) => {
            std::fs::create_dir_all(logs_dir)?;
            let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            tracing_appender::non_blocking(appender)
        }
        LogSink::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    })
}

/// Installs the global subscriber. Keep the guard alive until exit.
pub fn init(level: &str, sink: &LogSink) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = writer(sink)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(matches!(sink, LogSink::Stderr))
        .with_writer(writer)
        .try_init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_creates_logs_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let logs_dir = temp_dir.path().join("logs");

        let _guard = writer(&LogSink::File(logs_dir.clone())).unwrap();
        assert!(logs_dir.is_dir());
    }

    #[test]
    fn test_stderr_sink_needs_no_directory() {
        assert!(writer(&LogSink::Stderr).is_ok());
    }
}
