//! Record gateway configuration.
//!
//! Configuration is loaded from environment variables.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default record service endpoint.
pub const DEFAULT_RECORD_SERVICE_URL: &str = "http://localhost:50051";

/// Default per-RPC deadline in seconds.
pub const DEFAULT_RECORD_SERVICE_TIMEOUT_SECONDS: u64 = 10;

/// Maximum allowed per-RPC deadline in seconds.
pub const MAX_RECORD_SERVICE_TIMEOUT_SECONDS: u64 = 60;

/// Default connect timeout in seconds.
pub const DEFAULT_RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS: u64 = 5;

/// Record gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Record service gRPC endpoint (default: "http://localhost:50051").
    pub record_service_url: String,

    /// Per-RPC deadline (default: 10, range 1..=60).
    pub record_service_timeout_seconds: u64,

    /// Connect timeout for the record service channel (default: 5).
    pub record_service_connect_timeout_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid record service URL: {0}")]
    InvalidRecordServiceUrl(String),

    #[error("Invalid record service timeout configuration: {0}")]
    InvalidTimeout(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let record_service_url = vars
            .get("RECORD_SERVICE_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_RECORD_SERVICE_URL.to_string());

        if !record_service_url.starts_with("http://") && !record_service_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidRecordServiceUrl(format!(
                "RECORD_SERVICE_URL must start with http:// or https://, got '{}'",
                record_service_url
            )));
        }

        // Parse RPC deadline with validation
        let record_service_timeout_seconds =
            if let Some(value_str) = vars.get("RECORD_SERVICE_TIMEOUT_SECONDS") {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidTimeout(format!(
                        "RECORD_SERVICE_TIMEOUT_SECONDS must be a valid positive integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if value == 0 || value > MAX_RECORD_SERVICE_TIMEOUT_SECONDS {
                    return Err(ConfigError::InvalidTimeout(format!(
                        "RECORD_SERVICE_TIMEOUT_SECONDS must be between 1 and {}, got {}",
                        MAX_RECORD_SERVICE_TIMEOUT_SECONDS, value
                    )));
                }

                value
            } else {
                DEFAULT_RECORD_SERVICE_TIMEOUT_SECONDS
            };

        let record_service_connect_timeout_seconds =
            if let Some(value_str) = vars.get("RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS") {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidTimeout(format!(
                        "RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS must be a valid positive integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if value == 0 {
                    return Err(ConfigError::InvalidTimeout(
                        "RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS must be greater than 0".to_string(),
                    ));
                }

                value
            } else {
                DEFAULT_RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS
            };

        Ok(Config {
            bind_address,
            record_service_url,
            record_service_timeout_seconds,
            record_service_connect_timeout_seconds,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_defaults() {
        let config = Config::from_vars(&HashMap::new()).expect("Config should load successfully");

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.record_service_url, DEFAULT_RECORD_SERVICE_URL);
        assert_eq!(
            config.record_service_timeout_seconds,
            DEFAULT_RECORD_SERVICE_TIMEOUT_SECONDS
        );
        assert_eq!(
            config.record_service_connect_timeout_seconds,
            DEFAULT_RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS
        );
    }

    #[test]
    fn test_from_vars_custom_values() {
        let vars = HashMap::from([
            ("BIND_ADDRESS".to_string(), "127.0.0.1:9000".to_string()),
            (
                "RECORD_SERVICE_URL".to_string(),
                "https://records.internal:50051".to_string(),
            ),
            ("RECORD_SERVICE_TIMEOUT_SECONDS".to_string(), "60".to_string()),
            (
                "RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS".to_string(),
                "2".to_string(),
            ),
        ]);

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.record_service_url, "https://records.internal:50051");
        assert_eq!(config.record_service_timeout_seconds, 60);
        assert_eq!(config.record_service_connect_timeout_seconds, 2);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let vars = HashMap::from([(
            "RECORD_SERVICE_URL".to_string(),
            "localhost:50051".to_string(),
        )]);

        let result = Config::from_vars(&vars);
        assert!(matches!(result, Err(ConfigError::InvalidRecordServiceUrl(_))));
    }

    #[test]
    fn test_timeout_bounds() {
        for bad in ["0", "61", "-1", "ten"] {
            let vars = HashMap::from([(
                "RECORD_SERVICE_TIMEOUT_SECONDS".to_string(),
                bad.to_string(),
            )]);
            let result = Config::from_vars(&vars);
            assert!(
                matches!(result, Err(ConfigError::InvalidTimeout(_))),
                "expected rejection for {bad}"
            );
        }

        let vars = HashMap::from([(
            "RECORD_SERVICE_TIMEOUT_SECONDS".to_string(),
            "1".to_string(),
        )]);
        assert_eq!(
            Config::from_vars(&vars).unwrap().record_service_timeout_seconds,
            1
        );
    }

    #[test]
    fn test_connect_timeout_rejects_zero() {
        let vars = HashMap::from([(
            "RECORD_SERVICE_CONNECT_TIMEOUT_SECONDS".to_string(),
            "0".to_string(),
        )]);

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidTimeout(msg)) if msg.contains("greater than 0"))
        );
    }
}
