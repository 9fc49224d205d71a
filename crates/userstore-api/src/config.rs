//! Configuration management for the userstore service.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "USERSTORE_";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables prefixed with `USERSTORE_` (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// With no file and no environment the service listens on
/// `127.0.0.1:8888` and keeps its data in an in-memory database.
///
/// # Example
///
/// ```no_run
/// use userstore_api::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
///
/// println!("Server will bind to {}:{}", config.host, config.port);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Database
    /// SQLite connection URL.
    ///
    /// Environment variable: `USERSTORE_DATABASE_URL`
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Maximum number of database connections in the pool.
    ///
    /// Environment variable: `USERSTORE_DATABASE_MAX_CONNECTIONS`
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    /// Minimum number of connections to maintain in the pool.
    ///
    /// Environment variable: `USERSTORE_DATABASE_MIN_CONNECTIONS`
    #[serde(default = "default_min_connections")]
    pub database_min_connections: u32,
    /// Database connection acquire timeout in seconds.
    ///
    /// Environment variable: `USERSTORE_DATABASE_CONNECTION_TIMEOUT`
    #[serde(default = "default_acquire_timeout")]
    pub database_connection_timeout: u64,
    /// Database connection idle timeout in seconds. Ignored for in-memory
    /// databases.
    ///
    /// Environment variable: `USERSTORE_DATABASE_IDLE_TIMEOUT`
    #[serde(default = "default_idle_timeout")]
    pub database_idle_timeout: u64,
    /// Maximum lifetime of database connections in seconds. Ignored for
    /// in-memory databases.
    ///
    /// Environment variable: `USERSTORE_DATABASE_MAX_LIFETIME`
    #[serde(default = "default_max_lifetime")]
    pub database_max_lifetime: u64,

    // Server
    /// Server bind address.
    ///
    /// Environment variable: `USERSTORE_HOST`
    #[serde(default = "default_host")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `USERSTORE_PORT`
    #[serde(default = "default_port")]
    pub port: u16,
    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `USERSTORE_REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    // Logging
    /// Log filter used when `RUST_LOG` is not set.
    ///
    /// Environment variable: `USERSTORE_RUST_LOG`
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value fails
    /// validation.
    pub fn load() -> Result<Self> {
        Self::figment().extract::<Self>().context("Failed to load configuration")?.validated()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Parse server socket address from host and port configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Whether the database lives only in process memory.
    ///
    /// In-memory databases vanish with their last connection, so the pool
    /// must never retire idle connections.
    pub fn is_in_memory_database(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    /// Get database URL with password masked for logging.
    pub fn database_url_masked(&self) -> String {
        if let Some(at_pos) = self.database_url.find('@') {
            if let Some(colon_pos) = self.database_url[..at_pos].rfind(':') {
                let mut masked = self.database_url.clone();
                masked.replace_range(colon_pos + 1..at_pos, "***");
                return masked;
            }
        }
        self.database_url.clone()
    }

    /// Validate configuration values.
    fn validated(self) -> Result<Self> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.database_max_connections == 0 {
            anyhow::bail!("database max_connections must be greater than 0");
        }

        if self.database_min_connections > self.database_max_connections {
            anyhow::bail!("database min_connections cannot exceed max_connections");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            database_max_connections: default_max_connections(),
            database_min_connections: default_min_connections(),
            database_connection_timeout: default_acquire_timeout(),
            database_idle_timeout: default_idle_timeout(),
            database_max_lifetime: default_max_lifetime(),
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            rust_log: default_log_level(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_lifetime() -> u64 {
    1800
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8888
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info,userstore=debug,tower_http=debug".to_string()
}
