//! # API Configuration Module
//!
//! Loads server and business settings from environment variables, with
//! defaults for everything.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: host address to bind (default: "127.0.0.1")
//! - `API_PORT`: port to listen on (default: 3000)
//! - `DATABASE_URL`: SQLite URL (default: "sqlite://data/gym.db")
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 30)
//! - `ANNUAL_CARD_EXPIRING_DAYS`: expiring-soon window in days (default: 3)
//! - `LOW_REMAINING_SESSIONS_THRESHOLD`: low-remaining threshold (default: 3)
//! - `DASHBOARD_REFRESH_MINUTES`: reminder recompute interval (default: 10)

use eyre::{Result, WrapErr};
use gym_core::{models::dashboard::DEFAULT_LOW_REMAINING_THRESHOLD, status::DEFAULT_EXPIRING_DAYS};
use std::env;
use tracing::Level;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/gym.db";

/// Business thresholds shared by the dashboard, the reminder lists and the
/// background reminder task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSettings {
    pub expiring_days: i64,
    pub low_remaining_threshold: i64,
    pub refresh_minutes: u64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            expiring_days: DEFAULT_EXPIRING_DAYS,
            low_remaining_threshold: DEFAULT_LOW_REMAINING_THRESHOLD,
            refresh_minutes: 10,
        }
    }
}

/// Configuration for the gym API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use gym_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// SQLite database URL
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub reminders: ReminderSettings,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `API_PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Business thresholds
        let defaults = ReminderSettings::default();
        let reminders = ReminderSettings {
            expiring_days: threshold(env::var("ANNUAL_CARD_EXPIRING_DAYS").ok(), defaults.expiring_days),
            low_remaining_threshold: threshold(
                env::var("LOW_REMAINING_SESSIONS_THRESHOLD").ok(),
                defaults.low_remaining_threshold,
            ),
            refresh_minutes: env::var("DASHBOARD_REFRESH_MINUTES")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .filter(|minutes| *minutes > 0)
                .unwrap_or(defaults.refresh_minutes),
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            reminders,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:3000")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Unparseable or negative values fall back to `default`.
pub fn threshold(value: Option<String>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 0)
        .unwrap_or(default)
}
