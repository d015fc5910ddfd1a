//! Logging setup for relbridge.
//!
//! Each run writes one file under ~/.relbridge/logs/ (or `logging.directory`).
//! The configured level applies to the bridge itself; the HTTP stack used for
//! release fetches is held at `warn` so transport chatter stays out of the log.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::Deserialize;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log retention in hours.
pub const DEFAULT_LOG_RETENTION_HOURS: u32 = 24;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Crates the release fetch pulls in whose logs are capped at `warn`.
const QUIET_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "rustls"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log retention period in hours.
    pub retention_hours: u32,
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
    /// Whether logging is enabled.
    pub enabled: bool,
    /// Overrides the log directory.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            retention_hours: DEFAULT_LOG_RETENTION_HOURS,
            level: DEFAULT_LOG_LEVEL.to_string(),
            enabled: true,
            directory: None,
        }
    }
}

impl LogConfig {
    /// Normalizes a level name; unknown names fall back to the default.
    #[must_use]
    pub fn parse_level(value: &str) -> String {
        let level = match value.trim().to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" | "warning" => "warn",
            "error" => "error",
            "off" | "none" | "disabled" => "off",
            _ => DEFAULT_LOG_LEVEL,
        };
        level.to_string()
    }

    /// Whether a log file should be opened at all.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && Self::parse_level(&self.level) != "off"
    }

    /// Filter directives: the bridge at the configured level, HTTP crates at `warn`.
    #[must_use]
    pub fn directives(&self) -> String {
        let mut directives = Self::parse_level(&self.level);
        for target in QUIET_TARGETS {
            directives.push_str(&format!(",{}=warn", target));
        }
        directives
    }

    /// Directory log files are written to.
    #[must_use]
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(log_directory)
    }
}

/// Returns the log directory path (~/.relbridge/logs/).
#[must_use]
pub fn log_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".relbridge")
        .join("logs")
}

/// Returns a fresh log file path inside `dir`.
#[must_use]
pub fn log_file_path(dir: &Path) -> PathBuf {
    let now = chrono::Local::now();
    dir.join(format!("relbridge_{}.log", now.format("%Y-%m-%d_%H-%M-%S")))
}

/// Deletes `.log` files in `dir` older than the retention period.
///
/// # Errors
/// Returns error if the directory cannot be read.
pub fn cleanup_old_logs(dir: &Path, retention_hours: u32) -> io::Result<u32> {
    if !dir.exists() {
        return Ok(0);
    }

    let retention = Duration::from_secs(u64::from(retention_hours) * 3600);
    let now = SystemTime::now();
    let mut deleted = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }

        let age = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok());

        if let Some(age) = age {
            if age > retention && fs::remove_file(&path).is_ok() {
                deleted += 1;
            }
        }
    }

    Ok(deleted)
}

/// Initializes the logging system.
///
/// # Errors
/// Returns error if the log directory or file cannot be created.
pub fn init(config: &LogConfig) -> io::Result<()> {
    if !config.is_active() {
        return Ok(());
    }

    let log_dir = config.resolved_directory();
    fs::create_dir_all(&log_dir)?;
    let deleted = cleanup_old_logs(&log_dir, config.retention_hours)?;

    let log_path = log_file_path(&log_dir);
    let log_file = File::create(&log_path)?;

    let filter = EnvFilter::try_new(config.directives())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let file_layer = fmt::layer()
        .with_writer(log_file.with_max_level(tracing::Level::TRACE))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(
        "relbridge v{} logging to {} at {}",
        env!("CARGO_PKG_VERSION"),
        log_path.display(),
        config.level
    );
    if deleted > 0 {
        tracing::debug!("Removed {} log file(s) older than {}h", deleted, config.retention_hours);
    }

    Ok(())
}
