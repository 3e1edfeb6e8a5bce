//! Logging setup for the `linefile` binary
//!
//! Both outputs honour RUST_LOG:
//! - stderr defaults to `warn`
//! - `<config dir>/logs/linefile.*.log` defaults to `info`, rotates daily and
//!   keeps the last [`MAX_LOG_FILES`] files
//!
//! Text file operations log paths, line counts and byte counts only.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Rotated log files kept on disk
pub const MAX_LOG_FILES: usize = 7;

/// Install the console and file subscribers
pub fn init() {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter("warn"));

    let file_layer = file_appender().map(|appender| {
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .with_filter(env_filter("info"))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Daily-rotated appender; `None` (console only) when the directory is unusable
fn file_appender() -> Option<RollingFileAppender> {
    let built = crate::config_paths::ensure_logs_dir()
        .map_err(|e| e.to_string())
        .and_then(|dir| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("linefile")
                .filename_suffix("log")
                .max_log_files(MAX_LOG_FILES)
                .build(dir)
                .map_err(|e| e.to_string())
        });

    match built {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    }
}
