//! In-memory document store for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use tokio::sync::Mutex;

use common::{GatewayError, GatewayResult};
use domain::{PageWindow, UpdateOutcome, ID_FIELD, SET_OPERATOR};

use super::store::DocumentStore;

type Namespace = (String, String);

/// Stores documents in insertion order per `(database, collection)`.
///
/// Filters and `$set` updates follow the same top-level field semantics as
/// the server for the single-field shapes the gateway produces.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<Namespace, Vec<Document>>>,
    shutdowns: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

fn namespace(database: &str, collection: &str) -> Namespace {
    (database.to_string(), collection.to_string())
}

fn matches(filter: &Document, document: &Document) -> bool {
    filter
        .iter()
        .all(|(field, value)| document.get(field) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> GatewayResult<()> {
        Ok(())
    }

    async fn list_database_names(&self) -> GatewayResult<Vec<String>> {
        let collections = self.collections.lock().await;
        let mut names: Vec<String> = collections.keys().map(|(db, _)| db.clone()).collect();
        names.dedup();
        Ok(names)
    }

    async fn find_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> GatewayResult<Option<Document>> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(&namespace(database, collection))
            .and_then(|docs| docs.iter().find(|doc| matches(&filter, doc)))
            .cloned())
    }

    async fn find(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        window: PageWindow,
    ) -> GatewayResult<Vec<Document>> {
        let collections = self.collections.lock().await;
        let docs = collections
            .get(&namespace(database, collection))
            .map(|docs| docs.as_slice())
            .unwrap_or_default();

        Ok(window.apply(docs.iter().filter(|doc| matches(&filter, doc)).cloned()))
    }

    async fn insert_one(
        &self,
        database: &str,
        collection: &str,
        mut document: Document,
    ) -> GatewayResult<Bson> {
        let id = match document.get(ID_FIELD) {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert(ID_FIELD, id.clone());
                id
            }
        };

        let mut collections = self.collections.lock().await;
        let docs = collections.entry(namespace(database, collection)).or_default();
        if docs.iter().any(|doc| doc.get(ID_FIELD) == Some(&id)) {
            return Err(GatewayError::write(format!("duplicate key: {}", id)));
        }
        docs.push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> GatewayResult<UpdateOutcome> {
        let fields = update
            .get_document(SET_OPERATOR)
            .map_err(|e| GatewayError::write(format!("unsupported update: {}", e)))?
            .clone();

        let mut collections = self.collections.lock().await;
        let target = collections
            .get_mut(&namespace(database, collection))
            .and_then(|docs| docs.iter_mut().find(|doc| matches(&filter, doc)));

        let Some(target) = target else {
            return Ok(UpdateOutcome::new(0, 0));
        };

        let mut modified = false;
        for (field, value) in fields {
            if target.get(&field) != Some(&value) {
                target.insert(field, value);
                modified = true;
            }
        }
        Ok(UpdateOutcome::new(1, u64::from(modified)))
    }

    async fn delete_one(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> GatewayResult<u64> {
        let mut collections = self.collections.lock().await;
        let Some(docs) = collections.get_mut(&namespace(database, collection)) else {
            return Ok(0);
        };

        match docs.iter().position(|doc| matches(&filter, doc)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn shutdown(&self) -> GatewayResult<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
