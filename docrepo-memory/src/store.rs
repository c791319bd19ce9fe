//! In-memory driver implementation.
//!
//! Documents live in nested HashMaps behind an async-aware read-write lock:
//! database name -> collection name -> document key -> stored document.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document};
use mea::rwlock::RwLock;

use docrepo_core::{
    document::ID_FIELD,
    driver::{StoreClient, StoreDatabase},
    encoding::ClientSettings,
    error::{DocumentStoreError, DocumentStoreResult},
};

type CollectionMap = HashMap<String, Document>;
type DatabaseMap = HashMap<String, CollectionMap>;
type StoreMap = HashMap<String, DatabaseMap>;

/// Connection specifier scheme accepted by [`MemoryClient`].
pub const MEMORY_SCHEME: &str = "memory://";

/// Thread-safe in-memory driver client.
///
/// Every client owns its own store; clones share it. Connecting twice yields two
/// independent stores, like two separate servers.
///
/// # Example
///
/// ```ignore
/// use docrepo_memory::MemoryClient;
/// use docrepo::prelude::*;
///
/// let context = DbContext::<MemoryClient>::connect("memory://", "shop").await?;
/// ```
#[derive(Clone, Debug)]
pub struct MemoryClient {
    store: Arc<RwLock<StoreMap>>,
    settings: Arc<ClientSettings>,
}

impl MemoryClient {
    /// Creates a client with its own empty store.
    pub fn new(settings: Arc<ClientSettings>) -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
            settings,
        }
    }
}

impl Default for MemoryClient {
    fn default() -> Self {
        Self::new(Arc::new(ClientSettings::default()))
    }
}

#[async_trait]
impl StoreClient for MemoryClient {
    type Database = MemoryDatabase;

    async fn connect(dsn: &str, settings: Arc<ClientSettings>) -> DocumentStoreResult<Self> {
        if !dsn.starts_with(MEMORY_SCHEME) {
            return Err(DocumentStoreError::Connection(format!(
                "expected a {MEMORY_SCHEME} connection string, got {dsn:?}"
            )));
        }

        Ok(Self::new(settings))
    }

    fn settings(&self) -> &Arc<ClientSettings> {
        &self.settings
    }

    fn database(&self, name: &str) -> MemoryDatabase {
        MemoryDatabase {
            name: name.to_string(),
            store: Arc::clone(&self.store),
            settings: Arc::clone(&self.settings),
        }
    }
}

/// Handle to one database of a [`MemoryClient`] store.
#[derive(Clone, Debug)]
pub struct MemoryDatabase {
    name: String,
    store: Arc<RwLock<StoreMap>>,
    settings: Arc<ClientSettings>,
}

/// Key under which a stored document is indexed. Numeric keys of different widths
/// compare equal, as in MongoDB.
fn document_key(id: &Bson) -> String {
    id.to_string()
}

fn stored_key(document: &Document, collection: &str) -> DocumentStoreResult<String> {
    document
        .get(ID_FIELD)
        .map(document_key)
        .ok_or_else(|| {
            DocumentStoreError::Backend(format!("document without {ID_FIELD} for collection {collection}"))
        })
}

#[async_trait]
impl StoreDatabase for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> &Arc<ClientSettings> {
        &self.settings
    }

    async fn insert_documents(&self, documents: Vec<Document>, collection: &str) -> DocumentStoreResult<()> {
        let keyed = documents
            .into_iter()
            .map(|doc| stored_key(&doc, collection).map(|key| (key, doc)))
            .collect::<DocumentStoreResult<Vec<_>>>()?;

        let mut store = self.store.write().await;
        let collection_map = store
            .entry(self.name.clone())
            .or_default()
            .entry(collection.to_string())
            .or_default();

        // Reject the whole batch before writing anything
        for (index, (key, _)) in keyed.iter().enumerate() {
            if collection_map.contains_key(key) || keyed[..index].iter().any(|(k, _)| k == key) {
                return Err(DocumentStoreError::DocumentAlreadyExists(key.clone(), collection.to_string()));
            }
        }

        collection_map.extend(keyed);

        Ok(())
    }

    async fn find_document(&self, id: Bson, collection: &str) -> DocumentStoreResult<Option<Document>> {
        Ok(self
            .store
            .read()
            .await
            .get(&self.name)
            .and_then(|db| db.get(collection))
            .and_then(|col| col.get(&document_key(&id)))
            .cloned())
    }

    async fn find_documents(&self, collection: &str) -> DocumentStoreResult<Vec<Document>> {
        Ok(self
            .store
            .read()
            .await
            .get(&self.name)
            .and_then(|db| db.get(collection))
            .map(|col| col.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn count_documents(&self, collection: &str) -> DocumentStoreResult<u64> {
        Ok(self
            .store
            .read()
            .await
            .get(&self.name)
            .and_then(|db| db.get(collection))
            .map_or(0, |col| col.len() as u64))
    }

    async fn replace_document(&self, id: Bson, document: Document, collection: &str) -> DocumentStoreResult<bool> {
        let mut store = self.store.write().await;

        let Some(existing) = store
            .get_mut(&self.name)
            .and_then(|db| db.get_mut(collection))
            .and_then(|col| col.get_mut(&document_key(&id)))
        else {
            return Ok(false);
        };

        *existing = document;

        Ok(true)
    }

    async fn delete_documents(&self, ids: Vec<Bson>, collection: &str) -> DocumentStoreResult<u64> {
        let mut store = self.store.write().await;

        let Some(collection_map) = store
            .get_mut(&self.name)
            .and_then(|db| db.get_mut(collection))
        else {
            return Ok(0);
        };

        Ok(ids
            .iter()
            .filter(|id| collection_map.remove(&document_key(id)).is_some())
            .count() as u64)
    }

    async fn drop_collection(&self, name: &str) -> DocumentStoreResult<()> {
        if let Some(db) = self.store.write().await.get_mut(&self.name) {
            db.remove(name);
        }

        Ok(())
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        Ok(self
            .store
            .read()
            .await
            .get(&self.name)
            .map(|db| db.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use bson::doc;

    use super::*;

    async fn database(name: &str) -> MemoryDatabase {
        MemoryClient::connect("memory://", Arc::new(ClientSettings::default()))
            .await
            .unwrap()
            .database(name)
    }

    #[tokio::test]
    async fn rejects_foreign_schemes() {
        let err = MemoryClient::connect("mongodb://localhost", Arc::new(ClientSettings::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::Connection(_)));
    }

    #[tokio::test]
    async fn insert_then_find() {
        let db = database("shop").await;
        db.insert_documents(vec![doc! { "_id": 1, "sku": "A-1" }], "orders").await.unwrap();

        let found = db.find_document(Bson::Int32(1), "orders").await.unwrap().unwrap();
        assert_eq!(found.get_str("sku").unwrap(), "A-1");
        assert_eq!(db.count_documents("orders").await.unwrap(), 1);
        assert_eq!(db.list_collections().await.unwrap(), vec!["orders".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_keys_reject_the_whole_batch() {
        let db = database("shop").await;
        db.insert_documents(vec![doc! { "_id": "a" }], "orders").await.unwrap();

        let err = db
            .insert_documents(vec![doc! { "_id": "b" }, doc! { "_id": "a" }], "orders")
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::DocumentAlreadyExists(_, _)));

        let err = db
            .insert_documents(vec![doc! { "_id": "c" }, doc! { "_id": "c" }], "orders")
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::DocumentAlreadyExists(_, _)));

        assert_eq!(db.count_documents("orders").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn documents_without_id_are_rejected() {
        let db = database("shop").await;
        let err = db.insert_documents(vec![doc! { "sku": "A-1" }], "orders").await.unwrap_err();

        assert!(matches!(err, DocumentStoreError::Backend(_)));
    }

    #[tokio::test]
    async fn replace_and_delete_report_matches() {
        let db = database("shop").await;
        db.insert_documents(vec![doc! { "_id": 1, "qty": 1 }, doc! { "_id": 2, "qty": 1 }], "orders")
            .await
            .unwrap();

        assert!(db.replace_document(Bson::Int32(1), doc! { "_id": 1, "qty": 5 }, "orders").await.unwrap());
        assert!(!db.replace_document(Bson::Int32(9), doc! { "_id": 9 }, "orders").await.unwrap());
        assert!(!db.replace_document(Bson::Int32(1), doc! { "_id": 1 }, "missing").await.unwrap());

        let found = db.find_document(Bson::Int32(1), "orders").await.unwrap().unwrap();
        assert_eq!(found.get_i32("qty").unwrap(), 5);

        let removed = db
            .delete_documents(vec![Bson::Int32(1), Bson::Int32(2), Bson::Int32(3)], "orders")
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(db.delete_documents(vec![Bson::Int32(1)], "missing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn databases_are_isolated_and_drop_is_idempotent() {
        let client = MemoryClient::default();
        let shop = client.database("shop");
        let audit = client.database("audit");

        shop.insert_documents(vec![doc! { "_id": 1 }], "orders").await.unwrap();
        assert_eq!(audit.count_documents("orders").await.unwrap(), 0);

        shop.drop_collection("orders").await.unwrap();
        shop.drop_collection("orders").await.unwrap();
        audit.drop_collection("orders").await.unwrap();

        assert!(shop.find_documents("orders").await.unwrap().is_empty());
        assert!(shop.list_collections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_the_store_but_connections_do_not() {
        let first = MemoryClient::default();
        first
            .database("shop")
            .insert_documents(vec![doc! { "_id": 1 }], "orders")
            .await
            .unwrap();

        assert_eq!(first.clone().database("shop").count_documents("orders").await.unwrap(), 1);
        assert_eq!(
            MemoryClient::default().database("shop").count_documents("orders").await.unwrap(),
            0
        );
    }
}
