//! Infrastructure layer - Document database access
//!
//! This module handles all driver concerns:
//! - The `DocumentStore` seam the gateway calls through
//! - The MongoDB implementation of that seam

mod mongo;
mod store;

#[cfg(test)]
pub(crate) mod memory;

pub use mongo::MongoStore;
pub use store::DocumentStore;

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockDocumentStore;
