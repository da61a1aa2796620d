//! Logging initialisation for wslmate.
//!
//! The TUI owns the terminal, so logs only go to a file. Set
//! `WSLMATE_LOG=1` to write `wslmate.log` under the OS data directory
//! (filtered by `RUST_LOG`, default `info`). Without it no subscriber is
//! installed and the `tracing` macros are no-ops.

use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "WSLMATE_LOG";

/// Keep alive for the duration of the process so buffered lines get flushed
pub struct LogGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

pub fn init() -> LogGuard {
    if std::env::var(LOG_ENV).as_deref() != Ok("1") {
        return LogGuard { _file_guard: None };
    }

    let dir = log_dir();
    let _ = std::fs::create_dir_all(&dir);
    let file_appender = tracing_appender::rolling::never(&dir, "wslmate.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(file_layer)
        .try_init();

    LogGuard {
        _file_guard: Some(guard),
    }
}

/// Where the log file lives
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("wslmate")
}
