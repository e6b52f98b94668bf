//! Logging Infrastructure
//!
//! Structured logging setup for both development and production.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with console output
pub fn init_logger() {
    init_logger_with_file(None);
}

/// Initialize the logger, writing daily-rotated files when `log_dir` exists
///
/// Level comes from `RUST_LOG`, defaulting to `info`.
pub fn init_logger_with_file(log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "order-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
