//! Driver seam for document operations.

use async_trait::async_trait;
use bson::{Bson, Document};

use common::GatewayResult;
use domain::{PageWindow, UpdateOutcome};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Capability set the gateway needs from a document database.
///
/// Each method is a single round trip. Implementations classify driver
/// failures into `GatewayError` kinds but never retry, cache or apply
/// deadlines; the gateway bounds every call.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Round-trip a `ping` command
    async fn ping(&self) -> GatewayResult<()>;

    /// List every database name visible to the credentials
    async fn list_database_names(&self) -> GatewayResult<Vec<String>>;

    /// Find at most one document matching `filter`
    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> GatewayResult<Option<Document>>;

    /// Find the documents matching `filter` inside `window`, fully materialized
    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        window: PageWindow,
    ) -> GatewayResult<Vec<Document>>;

    /// Insert one document and return its server-assigned identifier
    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        document: Document,
    ) -> GatewayResult<Bson>;

    /// Apply `update` to at most one document matching `filter`
    async fn update_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> GatewayResult<UpdateOutcome>;

    /// Delete at most one document matching `filter`, returning the deleted count
    async fn delete_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> GatewayResult<u64>;

    /// Disconnect and release network resources
    async fn shutdown(&self) -> GatewayResult<()>;
}
