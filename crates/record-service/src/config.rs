//! Record service configuration.
//!
//! Configuration is loaded from environment variables. The database URL is
//! held as a secret and redacted in Debug output.

use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default gRPC bind address.
pub const DEFAULT_GRPC_BIND_ADDRESS: &str = "0.0.0.0:50051";

/// Default health/metrics HTTP bind address.
pub const DEFAULT_HEALTH_BIND_ADDRESS: &str = "0.0.0.0:8081";

/// Default maximum number of pooled database connections.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;

/// Default per-statement timeout applied to database queries, in seconds.
pub const DEFAULT_DB_QUERY_TIMEOUT_SECONDS: u32 = 5;

/// Record service configuration.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: SecretString,

    /// gRPC server bind address (default: "0.0.0.0:50051").
    pub grpc_bind_address: String,

    /// Health and metrics HTTP bind address (default: "0.0.0.0:8081").
    pub health_bind_address: String,

    /// Maximum pooled database connections (default: 20).
    pub db_max_connections: u32,

    /// Statement timeout appended to the database URL (default: 5).
    pub db_query_timeout_seconds: u32,

    /// Whether embedded migrations run at startup (default: true).
    pub run_migrations: bool,
}

/// Custom Debug implementation that redacts sensitive fields.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("grpc_bind_address", &self.grpc_bind_address)
            .field("health_bind_address", &self.health_bind_address)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_query_timeout_seconds", &self.db_query_timeout_seconds)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid database pool configuration: {0}")]
    InvalidDbPool(String),

    #[error("Invalid boolean value: {0}")]
    InvalidBool(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let grpc_bind_address = vars
            .get("GRPC_BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_GRPC_BIND_ADDRESS.to_string());

        let health_bind_address = vars
            .get("HEALTH_BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_HEALTH_BIND_ADDRESS.to_string());

        let db_max_connections = parse_positive(
            vars,
            "DB_MAX_CONNECTIONS",
            DEFAULT_DB_MAX_CONNECTIONS,
        )?;

        let db_query_timeout_seconds = parse_positive(
            vars,
            "DB_QUERY_TIMEOUT_SECONDS",
            DEFAULT_DB_QUERY_TIMEOUT_SECONDS,
        )?;

        let run_migrations = match vars.get("RUN_MIGRATIONS").map(|v| v.to_ascii_lowercase()) {
            None => true,
            Some(v) if v == "true" || v == "1" => true,
            Some(v) if v == "false" || v == "0" => false,
            Some(v) => {
                return Err(ConfigError::InvalidBool(format!(
                    "RUN_MIGRATIONS must be true or false, got '{}'",
                    v
                )))
            }
        };

        Ok(Config {
            database_url: SecretString::from(database_url),
            grpc_bind_address,
            health_bind_address,
            db_max_connections,
            db_query_timeout_seconds,
            run_migrations,
        })
    }
}

fn parse_positive(
    vars: &HashMap<String, String>,
    name: &str,
    default: u32,
) -> Result<u32, ConfigError> {
    let Some(value_str) = vars.get(name) else {
        return Ok(default);
    };

    let value: u32 = value_str.parse().map_err(|e| {
        ConfigError::InvalidDbPool(format!(
            "{} must be a valid positive integer, got '{}': {}",
            name, value_str, e
        ))
    })?;

    if value == 0 {
        return Err(ConfigError::InvalidDbPool(format!(
            "{} must be greater than 0",
            name
        )));
    }

    Ok(value)
}
