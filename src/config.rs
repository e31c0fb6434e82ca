//! Configuration management.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub notifications: NotificationConfig,
    pub detector: DetectorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Delay before a non-persistent notification is removed.
    pub expiry_ms: u64,
}

impl NotificationConfig {
    pub fn expiry(&self) -> Duration {
        Duration::from_millis(self.expiry_ms)
    }
}

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Portfolio size past which the workspace logs a warning about the
    /// pairwise scan.
    pub pairwise_warn_threshold: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pairwise_warn_threshold: 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            notifications: NotificationConfig {
                expiry_ms: env::var("NOTIFICATION_EXPIRY_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .expect("NOTIFICATION_EXPIRY_MS must be a valid number"),
            },
            detector: DetectorConfig {
                pairwise_warn_threshold: env::var("DETECTOR_WARN_THRESHOLD")
                    .unwrap_or_else(|_| "200".to_string())
                    .parse()
                    .expect("DETECTOR_WARN_THRESHOLD must be a valid number"),
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                format: match env::var("LOG_FORMAT").as_deref() {
                    Ok("json") => LogFormat::Json,
                    _ => LogFormat::Pretty,
                },
            },
        }
    }

    pub fn default_for_testing() -> Self {
        Self {
            notifications: NotificationConfig { expiry_ms: 5000 },
            detector: DetectorConfig::default(),
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}
