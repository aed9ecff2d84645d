//! Domain-level constants.
//!
//! These constants describe the document model and the default call bounds.

// =============================================================================
// Document Model
// =============================================================================

/// Field holding the server-assigned document identifier
pub const ID_FIELD: &str = "_id";

/// Update operator used for single-field updates
pub const SET_OPERATOR: &str = "$set";

/// Prefix reserved for query and update operators
pub const OPERATOR_PREFIX: char = '$';

// =============================================================================
// Deadlines
// =============================================================================

/// Default deadline for opening a connection, in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default deadline for closing a connection, in seconds
pub const DEFAULT_CLOSE_TIMEOUT_SECS: u64 = 10;

/// Default deadline for a single document operation, in seconds
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Connection
// =============================================================================

/// Default MongoDB connection URI (for development)
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

/// Database used for server-level commands such as `ping`
pub const ADMIN_DATABASE: &str = "admin";
