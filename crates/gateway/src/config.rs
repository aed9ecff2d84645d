//! Gateway configuration.

use std::env;

use common::{DatabaseConfig, DeadlineConfig, GatewayError, GatewayResult};
use domain::{
    DEFAULT_CLOSE_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MONGODB_URI,
    DEFAULT_OPERATION_TIMEOUT_SECS,
};

/// Gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Default deadlines for lifecycle and document calls
    pub deadlines: DeadlineConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig {
                uri: env::var("MONGODB_URI")
                    .unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string()),
                app_name: env::var("MONGODB_APP_NAME").ok(),
                max_pool_size: env::var("MONGODB_MAX_POOL_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            },
            deadlines: DeadlineConfig {
                connect_timeout_secs: env::var("GATEWAY_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
                close_timeout_secs: env::var("GATEWAY_CLOSE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CLOSE_TIMEOUT_SECS),
                operation_timeout_secs: env::var("GATEWAY_OPERATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_OPERATION_TIMEOUT_SECS),
            },
        }
    }

    /// Override the connection URI.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.database.uri = uri.into();
        self
    }

    /// Check the configuration before connecting.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.database.uri.is_empty() {
            return Err(GatewayError::config("MONGODB_URI is empty"));
        }
        if !self.database.uri.starts_with("mongodb://")
            && !self.database.uri.starts_with("mongodb+srv://")
        {
            return Err(GatewayError::config(
                "MONGODB_URI must start with mongodb:// or mongodb+srv://",
            ));
        }
        let deadlines = [
            ("GATEWAY_CONNECT_TIMEOUT_SECS", self.deadlines.connect_timeout_secs),
            ("GATEWAY_CLOSE_TIMEOUT_SECS", self.deadlines.close_timeout_secs),
            ("GATEWAY_OPERATION_TIMEOUT_SECS", self.deadlines.operation_timeout_secs),
        ];
        if let Some((name, _)) = deadlines.iter().find(|(_, secs)| *secs == 0) {
            return Err(GatewayError::config(format!("{} must be greater than zero", name)));
        }
        if self.database.max_pool_size == Some(0) {
            return Err(GatewayError::config(
                "MONGODB_MAX_POOL_SIZE must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ErrorKind;

    #[test]
    fn test_default_is_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
    }

    #[test]
    fn test_rejects_foreign_scheme() {
        let config = GatewayConfig::default().with_uri("postgres://localhost/app");
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_rejects_zero_connect_timeout() {
        let mut config = GatewayConfig::default();
        config.deadlines.connect_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_close_and_operation_timeouts() {
        let mut config = GatewayConfig::default();
        config.deadlines.operation_timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("GATEWAY_OPERATION_TIMEOUT_SECS"));

        let mut config = GatewayConfig::default();
        config.deadlines.close_timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GATEWAY_CLOSE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_accepts_srv_uri() {
        let config = GatewayConfig::default().with_uri("mongodb+srv://cluster.example.net");
        assert!(config.validate().is_ok());
    }
}
