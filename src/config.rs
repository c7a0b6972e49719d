//! Configuration management for tasktrack.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8080`.
//! - `WORKERS` - Optional. Worker count for the worker-demo binary. Defaults to `4`.
//! - `WORKER_DELAY_MS` - Optional. Simulated per-task work duration in
//!   milliseconds for the worker-demo binary. Defaults to `2000`.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Number of workers for the worker-demo pool
    pub workers: usize,

    /// Simulated per-task work duration for the worker-demo pool
    pub worker_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let workers = std::env::var("WORKERS")
            .unwrap_or_else(|_| "4".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("WORKERS".to_string(), format!("{}", e)))?;

        let worker_delay_ms: u64 = std::env::var("WORKER_DELAY_MS")
            .unwrap_or_else(|_| "2000".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("WORKER_DELAY_MS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            host,
            port,
            workers,
            worker_delay: Duration::from_millis(worker_delay_ms),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 4,
            worker_delay: Duration::from_millis(2000),
        }
    }
}
