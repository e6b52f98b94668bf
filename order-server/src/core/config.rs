use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Database and log files |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | BROADCAST_CAPACITY | 64 | Per-viewer message buffer |
/// | ARCHIVE_LOOKBACK_DAYS | 30 | How far back /archived reaches |
/// | ENVIRONMENT | development | development \| production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/luwei HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Broadcast channel capacity per viewer
    pub broadcast_capacity: usize,
    /// Archived-order query window, in days
    pub archive_lookback_days: i64,
    /// development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            broadcast_capacity: std::env::var("BROADCAST_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(64),
            archive_lookback_days: std::env::var("ARCHIVE_LOOKBACK_DAYS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Path of the redb database file
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("orders.redb")
    }

    /// Log directory inside the work dir
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
