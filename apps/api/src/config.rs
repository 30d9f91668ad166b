//! API server configuration.
//!
//! Configuration is loaded from environment variables. `PORT` and `DB_CONN`
//! have no defaults; everything else does.

use std::env;
use std::net::{IpAddr, SocketAddr};

use kasir_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// Listen address (default: 0.0.0.0)
    pub bind_addr: IpAddr,

    /// SQLite database file path, or `:memory:`
    pub db_conn: String,

    /// Pool size (default: 5)
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingRequired(key.to_string()))
        };

        let config = ApiConfig {
            port: required("PORT")?
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            bind_addr: lookup("BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BIND_ADDR".to_string()))?,

            db_conn: required("DB_CONN")?,

            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to bind the HTTP listener to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Database pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.db_conn == kasir_db::pool::IN_MEMORY_PATH {
            return DbConfig::in_memory();
        }

        DbConfig::new(&self.db_conn).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("PORT", "8080"), ("DB_CONN", "kasir.db")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.db_conn, "kasir.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.db_config().max_connections, 5);
    }

    #[test]
    fn test_missing_required() {
        assert_eq!(
            load(&[("DB_CONN", "kasir.db")]),
            Err(ConfigError::MissingRequired("PORT".to_string()))
        );
        assert_eq!(
            load(&[("PORT", "8080"), ("DB_CONN", "  ")]),
            Err(ConfigError::MissingRequired("DB_CONN".to_string()))
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            load(&[("PORT", "eighty"), ("DB_CONN", "kasir.db")]),
            Err(ConfigError::InvalidValue("PORT".to_string()))
        );
        assert_eq!(
            load(&[("PORT", "8080"), ("DB_CONN", "kasir.db"), ("DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))
        );
        assert_eq!(
            load(&[("PORT", "8080"), ("DB_CONN", "kasir.db"), ("BIND_ADDR", "localhost")]),
            Err(ConfigError::InvalidValue("BIND_ADDR".to_string()))
        );
    }

    #[test]
    fn test_memory_database() {
        let config = load(&[("PORT", "8080"), ("DB_CONN", ":memory:")]).unwrap();
        assert!(config.db_config().is_in_memory());
    }
}
