use std::sync::Arc;

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection, Database,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::ClientOptions,
};
use docrepo_core::{
    document::ID_FIELD,
    driver::{StoreClient, StoreDatabase},
    encoding::ClientSettings,
    error::{DocumentStoreError, DocumentStoreResult},
};

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::InsertMany(e) => e
            .write_errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|e| e.code == DUPLICATE_KEY)),
        _ => false,
    }
}

fn backend(err: MongoError) -> DocumentStoreError {
    DocumentStoreError::Backend(err.to_string())
}

/// MongoDB driver client.
///
/// Construction parses the connection string eagerly, so malformed specifiers fail at
/// construction, but no connection is opened until the first operation.
#[derive(Clone, Debug)]
pub struct MongoClient {
    client: Client,
    settings: Arc<ClientSettings>,
}

impl MongoClient {
    /// Wraps an existing driver client.
    pub fn new(client: Client, settings: Arc<ClientSettings>) -> Self {
        Self { client, settings }
    }

    /// The underlying driver client.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl StoreClient for MongoClient {
    type Database = MongoDatabase;

    async fn connect(dsn: &str, settings: Arc<ClientSettings>) -> DocumentStoreResult<Self> {
        let options = ClientOptions::parse(dsn)
            .await
            .map_err(|e| DocumentStoreError::Connection(e.to_string()))?;

        Ok(Self::new(
            Client::with_options(options).map_err(|e| DocumentStoreError::Connection(e.to_string()))?,
            settings,
        ))
    }

    fn settings(&self) -> &Arc<ClientSettings> {
        &self.settings
    }

    fn database(&self, name: &str) -> MongoDatabase {
        MongoDatabase::new(self.client.database(name), Arc::clone(&self.settings))
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

/// Handle to one MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoDatabase {
    database: Database,
    settings: Arc<ClientSettings>,
}

impl MongoDatabase {
    pub fn new(database: Database, settings: Arc<ClientSettings>) -> Self {
        Self { database, settings }
    }

    /// The underlying driver database, for operations this crate does not wrap.
    pub fn inner(&self) -> &Database {
        &self.database
    }

    fn get_collection(&self, collection: &str) -> MongoCollection<Document> {
        self.database.collection(collection)
    }
}

#[async_trait]
impl StoreDatabase for MongoDatabase {
    fn name(&self) -> &str {
        self.database.name()
    }

    fn settings(&self) -> &Arc<ClientSettings> {
        &self.settings
    }

    async fn insert_documents(&self, documents: Vec<Document>, collection: &str) -> DocumentStoreResult<()> {
        self.get_collection(collection)
            .insert_many(documents)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    DocumentStoreError::DocumentAlreadyExists(e.to_string(), collection.to_string())
                } else {
                    backend(e)
                }
            })?;

        Ok(())
    }

    async fn find_document(&self, id: Bson, collection: &str) -> DocumentStoreResult<Option<Document>> {
        self.get_collection(collection)
            .find_one(doc! { ID_FIELD: id })
            .await
            .map_err(backend)
    }

    async fn find_documents(&self, collection: &str) -> DocumentStoreResult<Vec<Document>> {
        self.get_collection(collection)
            .find(doc! {})
            .await
            .map_err(backend)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(backend)
    }

    async fn count_documents(&self, collection: &str) -> DocumentStoreResult<u64> {
        self.get_collection(collection)
            .count_documents(doc! {})
            .await
            .map_err(backend)
    }

    async fn replace_document(&self, id: Bson, document: Document, collection: &str) -> DocumentStoreResult<bool> {
        Ok(self
            .get_collection(collection)
            .replace_one(doc! { ID_FIELD: id }, document)
            .await
            .map_err(backend)?
            .matched_count
            > 0)
    }

    async fn delete_documents(&self, ids: Vec<Bson>, collection: &str) -> DocumentStoreResult<u64> {
        Ok(self
            .get_collection(collection)
            .delete_many(doc! { ID_FIELD: { "$in": ids } })
            .await
            .map_err(backend)?
            .deleted_count)
    }

    async fn drop_collection(&self, name: &str) -> DocumentStoreResult<()> {
        self.get_collection(name)
            .drop()
            .await
            .map_err(backend)
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        self.database
            .list_collection_names()
            .await
            .map_err(backend)
    }
}

#[cfg(test)]
mod tests {
    use docrepo_core::encoding::IdEncoding;

    use super::*;

    #[tokio::test]
    async fn malformed_connection_string_fails_at_construction() {
        let err = MongoClient::connect("not a connection string", Arc::new(ClientSettings::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::Connection(_)));
    }

    #[tokio::test]
    async fn construction_does_not_contact_the_server() {
        // Nothing listens on this port; parsing and client construction still succeed.
        let settings = Arc::new(ClientSettings::new(IdEncoding::JavaLegacy));
        let client = MongoClient::connect("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=100", settings)
            .await
            .unwrap();

        let database = client.database("shop");
        assert_eq!(database.name(), "shop");
        assert_eq!(database.settings().peek_id_encoding(), IdEncoding::JavaLegacy);
    }

    #[tokio::test]
    #[ignore = "requires a MongoDB server at DOCREPO_MONGODB_URI"]
    async fn round_trip_against_a_server() {
        let uri = std::env::var("DOCREPO_MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
        let client = MongoClient::connect(&uri, Arc::new(ClientSettings::default()))
            .await
            .unwrap();
        let database = client.database("docrepo_driver_tests");

        database.drop_collection("widgets").await.unwrap();
        database
            .insert_documents(vec![doc! { "_id": 1, "name": "bolt" }], "widgets")
            .await
            .unwrap();

        let err = database
            .insert_documents(vec![doc! { "_id": 1 }], "widgets")
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::DocumentAlreadyExists(_, _)));

        assert_eq!(database.count_documents("widgets").await.unwrap(), 1);
        assert!(database
            .replace_document(Bson::Int32(1), doc! { "_id": 1, "name": "nut" }, "widgets")
            .await
            .unwrap());
        assert_eq!(
            database
                .find_document(Bson::Int32(1), "widgets")
                .await
                .unwrap()
                .unwrap()
                .get_str("name")
                .unwrap(),
            "nut"
        );
        assert_eq!(database.delete_documents(vec![Bson::Int32(1)], "widgets").await.unwrap(), 1);

        database.drop_collection("widgets").await.unwrap();
        client.shutdown().await.unwrap();
    }
}
