//! Document gateway - CRUD façade over a document store.
//!
//! A `DocumentGateway` owns one session to the database and exposes
//! single-document and paged reads plus single-document writes, each bounded
//! by a deadline. The handle is either open or closed; closing is one way,
//! and every call made on a closed handle fails with
//! `GatewayError::ClosedHandle` without touching the store.
//!
//! Results of `fetch_many` are returned in the server's natural order. No
//! sort is requested, so the order of repeated calls is only as stable as
//! the backing store makes it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use common::{DeadlineConfig, GatewayError, GatewayResult, OptionExt};
use domain::{
    validate_namespace, Deadline, FieldUpdate, Filter, InsertedId, PageWindow, UpdateOutcome,
};

use crate::config::GatewayConfig;
use crate::infra::{DocumentStore, MongoStore};


/// Shared handle to a document database.
///
/// All operations take `&self`; wrap the gateway in an `Arc` to share it
/// across tasks. The underlying driver client handles concurrent calls.
pub struct DocumentGateway {
    store: RwLock<Option<Arc<dyn DocumentStore>>>,
    deadlines: DeadlineConfig,
}

impl DocumentGateway {
    /// Connect to the configured database.
    ///
    /// Builds the driver client and completes a `ping` handshake within the
    /// connect deadline. Nothing is retried.
    pub async fn open(config: &GatewayConfig) -> GatewayResult<Self> {
        config.validate()?;

        let deadline = config.deadlines.connect();
        let connect = async {
            let store = MongoStore::connect(&config.database, deadline).await?;
            store.ping().await?;
            Ok::<_, GatewayError>(store)
        };

        let store = bounded("open", deadline, connect).await?;
        info!("Document gateway connected");

        Ok(Self::with_store(Arc::new(store), config.deadlines))
    }

    /// Build an open gateway over an existing store.
    pub fn with_store(store: Arc<dyn DocumentStore>, deadlines: DeadlineConfig) -> Self {
        Self {
            store: RwLock::new(Some(store)),
            deadlines,
        }
    }

    /// Disconnect from the database.
    ///
    /// The store is detached before disconnecting, so its resources are
    /// released even if the disconnect fails or exceeds its deadline. A
    /// second call returns `ClosedHandle`.
    pub async fn close(&self, deadline: Deadline) -> GatewayResult<()> {
        let store = self
            .store
            .write()
            .await
            .take()
            .ok_or(GatewayError::ClosedHandle)?;

        let deadline = deadline.resolve(self.deadlines.close());
        let result = bounded("close", deadline, store.shutdown()).await;
        drop(store);

        if result.is_ok() {
            info!("Document gateway closed");
        }
        result
    }

    /// Whether `close` has been called.
    pub async fn is_closed(&self) -> bool {
        self.store.read().await.is_none()
    }

    /// Round-trip a `ping` to the server.
    pub async fn ping(&self, deadline: Deadline) -> GatewayResult<()> {
        let store = self.store().await?;
        self.run("ping", deadline, store.ping()).await
    }

    /// List every database name visible to the credentials.
    ///
    /// The full set is returned in one round trip. Catalog listings are
    /// small; do not copy this shape for document listings.
    pub async fn list_databases(&self, deadline: Deadline) -> GatewayResult<Vec<String>> {
        let store = self.store().await?;
        self.run("list_databases", deadline, store.list_database_names())
            .await
    }

    /// Fetch one document matching `filter` and decode it into `T`.
    ///
    /// Returns `NotFound` when nothing matched and `Query` when the read or
    /// the decode failed.
    pub async fn fetch_one<T>(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        deadline: Deadline,
    ) -> GatewayResult<T>
    where
        T: DeserializeOwned,
    {
        let store = self.store().await?;
        validate_namespace(database, collection)?;
        filter.validate()?;

        debug!(database, collection, %filter, "fetch_one");
        let document = self
            .run(
                "fetch_one",
                deadline,
                store.find_one(database, collection, filter.to_document()),
            )
            .await?
            .ok_or_not_found(database, collection)?;

        bson::from_document(document).map_err(GatewayError::query)
    }

    /// Fetch the documents matching `filter` inside `window`.
    ///
    /// Skips `window.offset` matches and returns up to `window.limit` of the
    /// rest. A failure while draining the cursor or decoding any document
    /// fails the whole call; partial pages are never returned.
    pub async fn fetch_many<T>(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        window: PageWindow,
        deadline: Deadline,
    ) -> GatewayResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let store = self.store().await?;
        validate_namespace(database, collection)?;
        filter.validate()?;

        debug!(
            database,
            collection,
            %filter,
            limit = window.limit,
            offset = window.offset,
            "fetch_many"
        );
        let documents = self
            .run(
                "fetch_many",
                deadline,
                store.find(database, collection, filter.to_document(), window),
            )
            .await?;

        documents
            .into_iter()
            .map(|document| bson::from_document(document).map_err(GatewayError::query))
            .collect()
    }

    /// Insert one document and return the identifier the server assigned.
    pub async fn insert<T>(
        &self,
        database: &str,
        collection: &str,
        document: &T,
        deadline: Deadline,
    ) -> GatewayResult<InsertedId>
    where
        T: Serialize + ?Sized,
    {
        let store = self.store().await?;
        validate_namespace(database, collection)?;
        let document = bson::to_document(document).map_err(GatewayError::write)?;

        debug!(database, collection, "insert");
        let id = self
            .run("insert", deadline, store.insert_one(database, collection, document))
            .await?;

        Ok(InsertedId::from(id))
    }

    /// Set one field on at most one document matching `filter`.
    ///
    /// Returns `true` iff exactly one document was modified. A filter that
    /// matches nothing returns `false`, as does a match that already held
    /// the value; use `update_detailed` to tell those apart.
    pub async fn update(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        update: &FieldUpdate,
        deadline: Deadline,
    ) -> GatewayResult<bool> {
        self.update_detailed(database, collection, filter, update, deadline)
            .await
            .map(|outcome| outcome.modified_one())
    }

    /// Set one field on at most one document matching `filter`, reporting
    /// the raw matched and modified counts.
    pub async fn update_detailed(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        update: &FieldUpdate,
        deadline: Deadline,
    ) -> GatewayResult<UpdateOutcome> {
        let store = self.store().await?;
        validate_namespace(database, collection)?;
        filter.validate()?;
        update.validate()?;

        debug!(database, collection, %filter, field = %update.field, "update");
        self.run(
            "update",
            deadline,
            store.update_one(
                database,
                collection,
                filter.to_document(),
                update.to_document(),
            ),
        )
        .await
    }

    /// Delete at most one document matching `filter`.
    ///
    /// Returns `true` iff exactly one document was deleted.
    pub async fn delete(
        &self,
        database: &str,
        collection: &str,
        filter: &Filter,
        deadline: Deadline,
    ) -> GatewayResult<bool> {
        let store = self.store().await?;
        validate_namespace(database, collection)?;
        filter.validate()?;

        debug!(database, collection, %filter, "delete");
        let deleted = self
            .run(
                "delete",
                deadline,
                store.delete_one(database, collection, filter.to_document()),
            )
            .await?;

        Ok(deleted == 1)
    }

    /// Clone the store handle, or fail if the gateway is closed.
    async fn store(&self) -> GatewayResult<Arc<dyn DocumentStore>> {
        self.store
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(GatewayError::ClosedHandle)
    }

    /// Run one store call under the resolved operation deadline.
    async fn run<T, F>(
        &self,
        operation: &'static str,
        deadline: Deadline,
        call: F,
    ) -> GatewayResult<T>
    where
        F: Future<Output = GatewayResult<T>>,
    {
        bounded(operation, deadline.resolve(self.deadlines.operation()), call).await
    }
}

/// Await `call` for at most `deadline`, logging failures.
async fn bounded<T, F>(operation: &'static str, deadline: Duration, call: F) -> GatewayResult<T>
where
    F: Future<Output = GatewayResult<T>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!(operation, code = e.code(), "Document operation failed: {}", e);
            Err(e)
        }
        Err(_) => {
            error!(operation, ?deadline, "Document operation exceeded its deadline");
            Err(GatewayError::timeout(operation, deadline))
        }
    }
}
