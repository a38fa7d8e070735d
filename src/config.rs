//! Configuration management for the contact book server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is loaded first if present.

use crate::error::{ConfigError, ConfigResult};
use axum::http::HeaderValue;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Upper bound for `DB_POOL_SIZE`.
const MAX_POOL_SIZE: u32 = 64;

/// Configuration for the contact book server.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file (default: "contacts.db")
    pub database_path: PathBuf,

    /// Maximum pooled database connections (default: 10)
    pub db_pool_size: u32,

    /// Address to bind the HTTP listener to (default: "127.0.0.1")
    pub host: IpAddr,

    /// Port to listen on (default: 3000)
    pub port: u16,

    /// File that receives one line per deleted contact
    /// (default: "./logs/deleteLogs.txt")
    pub delete_log_path: PathBuf,

    /// Log level used when RUST_LOG is not set (default: "info")
    pub log_level: String,

    /// Browser origin allowed to call the API (default: "http://localhost:5173")
    pub cors_origin: HeaderValue,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `DATABASE_PATH`: SQLite file path (default: "contacts.db")
    /// - `DB_POOL_SIZE`: Max pooled connections, 1-64 (default: 10)
    /// - `HOST`: Bind address (default: "127.0.0.1")
    /// - `PORT`: Listen port (default: 3000)
    /// - `DELETE_LOG_PATH`: Deletion log file (default: "./logs/deleteLogs.txt")
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ORIGIN`: Allowed browser origin (default: "http://localhost:5173")
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine; every variable has a default.
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let database_path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        if database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "DATABASE_PATH".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let db_pool_size = Self::parse_env_u32("DB_POOL_SIZE", defaults.db_pool_size)?;
        if db_pool_size == 0 || db_pool_size > MAX_POOL_SIZE {
            return Err(ConfigError::InvalidValue {
                var: "DB_POOL_SIZE".to_string(),
                reason: format!("Must be between 1 and {}", MAX_POOL_SIZE),
            });
        }

        let host = match env::var("HOST") {
            Ok(val) => val.parse::<IpAddr>().map_err(|_| ConfigError::InvalidValue {
                var: "HOST".to_string(),
                reason: format!("Must be an IP address, got: {}", val),
            })?,
            Err(_) => defaults.host,
        };

        let port = Self::parse_env_u16("PORT", defaults.port)?;

        let delete_log_path = env::var("DELETE_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.delete_log_path);

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        let cors_origin = match env::var("CORS_ORIGIN") {
            Ok(val) => HeaderValue::from_str(&val).map_err(|_| ConfigError::InvalidValue {
                var: "CORS_ORIGIN".to_string(),
                reason: format!("Not a valid header value: {:?}", val),
            })?,
            Err(_) => defaults.cors_origin,
        };

        Ok(Config {
            database_path,
            db_pool_size,
            host,
            port,
            delete_log_path,
            log_level,
            cors_origin,
        })
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from("contacts.db"),
            db_pool_size: 10,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            delete_log_path: PathBuf::from("./logs/deleteLogs.txt"),
            log_level: "info".to_string(),
            cors_origin: HeaderValue::from_static("http://localhost:5173"),
        }
    }
}
