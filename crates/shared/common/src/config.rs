//! Shared configuration structures.

use std::time::Duration;

use domain::{
    DEFAULT_CLOSE_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MONGODB_URI,
    DEFAULT_OPERATION_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};

/// Document database connection configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection URI, owned by the driver (`mongodb://` or `mongodb+srv://`)
    #[serde(skip_serializing)]
    pub uri: String,
    /// Application name reported to the server
    pub app_name: Option<String>,
    /// Upper bound on the driver's connection pool
    pub max_pool_size: Option<u32>,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &"[REDACTED]")
            .field("app_name", &self.app_name)
            .field("max_pool_size", &self.max_pool_size)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGODB_URI.to_string(),
            app_name: None,
            max_pool_size: None,
        }
    }
}

/// Deadlines applied to calls that do not carry their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeadlineConfig {
    /// Bound on Open (client construction and handshake), in seconds
    pub connect_timeout_secs: u64,
    /// Bound on Close, in seconds
    pub close_timeout_secs: u64,
    /// Bound on each document operation, in seconds
    pub operation_timeout_secs: u64,
}

impl DeadlineConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn close(&self) -> Duration {
        Duration::from_secs(self.close_timeout_secs)
    }

    pub fn operation(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            close_timeout_secs: DEFAULT_CLOSE_TIMEOUT_SECS,
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT_SECS,
        }
    }
}
