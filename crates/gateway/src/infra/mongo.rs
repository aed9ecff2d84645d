//! MongoDB implementation of the document store.

use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::error::{Error as DriverError, ErrorKind as DriverErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::debug;

use common::{BoxError, DatabaseConfig, GatewayError, GatewayResult};
use domain::{PageWindow, UpdateOutcome, ADMIN_DATABASE};

use super::store::DocumentStore;

/// Document store backed by the official MongoDB driver.
///
/// The driver client is internally pooled and safe to share across tasks;
/// cloning a `MongoStore` clones the handle, not the connections.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Build a client from configuration.
    ///
    /// The driver connects lazily, so this only parses the URI (which may
    /// involve an SRV lookup) and constructs the client. Call `ping` to
    /// complete the handshake.
    pub async fn connect(
        config: &DatabaseConfig,
        connect_timeout: Duration,
    ) -> GatewayResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(GatewayError::connection)?;

        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);

        if let Some(app_name) = &config.app_name {
            options.app_name = Some(app_name.clone());
        }
        if let Some(max_pool_size) = config.max_pool_size {
            options.max_pool_size = Some(max_pool_size);
        }

        let client = Client::with_options(options).map_err(GatewayError::connection)?;
        debug!("MongoDB client constructed");

        Ok(Self { client })
    }

    /// Wrap an existing driver client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn collection(&self, database: &str, collection: &str) -> Collection<Document> {
        self.client.database(database).collection(collection)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> GatewayResult<()> {
        self.client
            .database(ADMIN_DATABASE)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(GatewayError::connection)?;
        Ok(())
    }

    async fn list_database_names(&self) -> GatewayResult<Vec<String>> {
        self.client
            .list_database_names()
            .await
            .map_err(|e| classify(e, GatewayError::Query))
    }

    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> GatewayResult<Option<Document>> {
        self.collection(database, collection)
            .find_one(filter)
            .await
            .map_err(|e| classify(e, GatewayError::Query))
    }

    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        window: PageWindow,
    ) -> GatewayResult<Vec<Document>> {
        let limit = window.driver_limit()?;

        let cursor = self
            .collection(database, collection)
            .find(filter)
            .skip(window.offset)
            .limit(limit)
            .await
            .map_err(|e| classify(e, GatewayError::Query))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| classify(e, GatewayError::Query))
    }

    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        document: Document,
    ) -> GatewayResult<Bson> {
        let result = self
            .collection(database, collection)
            .insert_one(document)
            .await
            .map_err(|e| classify(e, GatewayError::Write))?;

        Ok(result.inserted_id)
    }

    async fn update_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> GatewayResult<UpdateOutcome> {
        let result = self
            .collection(database, collection)
            .update_one(filter, update)
            .await
            .map_err(|e| classify(e, GatewayError::Write))?;

        Ok(UpdateOutcome::new(result.matched_count, result.modified_count))
    }

    async fn delete_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> GatewayResult<u64> {
        let result = self
            .collection(database, collection)
            .delete_one(filter)
            .await
            .map_err(|e| classify(e, GatewayError::Write))?;

        Ok(result.deleted_count)
    }

    async fn shutdown(&self) -> GatewayResult<()> {
        // Waits for outstanding cursors and sessions to be dropped.
        self.client.clone().shutdown().await;
        Ok(())
    }
}

/// Convert a driver error into a gateway error.
///
/// Session-level failures are reported as connection errors whichever path
/// raised them; everything else takes the kind of the calling path.
fn classify(err: DriverError, path: fn(BoxError) -> GatewayError) -> GatewayError {
    match err.kind.as_ref() {
        DriverErrorKind::Io(_)
        | DriverErrorKind::ServerSelection { .. }
        | DriverErrorKind::DnsResolve { .. }
        | DriverErrorKind::Authentication { .. }
        | DriverErrorKind::ConnectionPoolCleared { .. } => GatewayError::connection(err),
        _ => path(Box::new(err)),
    }
}
