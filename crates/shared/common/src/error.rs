//! Unified error handling for gateway operations.
//!
//! Every failure reaches the caller as a `GatewayError` carrying its kind
//! and, where one exists, the underlying driver or codec error as `source`.

use std::time::Duration;

use domain::DomainError;
use thiserror::Error;

/// Boxed cause attached to driver-backed errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Gateway error types.
#[derive(Error, Debug)]
pub enum GatewayError {
    // Session
    #[error("Connection error: {0}")]
    Connection(#[source] BoxError),

    #[error("{operation} exceeded its deadline of {deadline:?}")]
    Timeout {
        operation: &'static str,
        deadline: Duration,
    },

    #[error("Handle is closed")]
    ClosedHandle,

    // Reads
    #[error("No document matched in {database}.{collection}")]
    NotFound { database: String, collection: String },

    #[error("Query failed: {0}")]
    Query(#[source] BoxError),

    // Writes
    #[error("Write failed: {0}")]
    Write(#[source] BoxError),

    // Caller mistakes
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a `GatewayError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Connection,
    Timeout,
    ClosedHandle,
    NotFound,
    Query,
    Write,
    InvalidArgument,
    Config,
}

impl GatewayError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Connection(_) => ErrorKind::Connection,
            GatewayError::Timeout { .. } => ErrorKind::Timeout,
            GatewayError::ClosedHandle => ErrorKind::ClosedHandle,
            GatewayError::NotFound { .. } => ErrorKind::NotFound,
            GatewayError::Query(_) => ErrorKind::Query,
            GatewayError::Write(_) => ErrorKind::Write,
            GatewayError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            GatewayError::Config(_) => ErrorKind::Config,
        }
    }

    /// Get a stable error code for logs and CLI output
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Connection => "CONNECTION_ERROR",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::ClosedHandle => "CLOSED_HANDLE",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Query => "QUERY_ERROR",
            ErrorKind::Write => "WRITE_ERROR",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::Config => "CONFIG_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => GatewayError::InvalidArgument(msg),
        }
    }
}

/// Result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Extension trait for Option -> GatewayError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, database: &str, collection: &str) -> GatewayResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, database: &str, collection: &str) -> GatewayResult<T> {
        self.ok_or_else(|| GatewayError::not_found(database, collection))
    }
}

/// Convenience constructors
impl GatewayError {
    pub fn connection(cause: impl Into<BoxError>) -> Self {
        GatewayError::Connection(cause.into())
    }

    pub fn query(cause: impl Into<BoxError>) -> Self {
        GatewayError::Query(cause.into())
    }

    pub fn write(cause: impl Into<BoxError>) -> Self {
        GatewayError::Write(cause.into())
    }

    pub fn timeout(operation: &'static str, deadline: Duration) -> Self {
        GatewayError::Timeout {
            operation,
            deadline,
        }
    }

    pub fn not_found(database: impl Into<String>, collection: impl Into<String>) -> Self {
        GatewayError::NotFound {
            database: database.into(),
            collection: collection.into(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        GatewayError::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        GatewayError::Config(msg.into())
    }
}
