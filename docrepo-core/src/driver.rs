//! Store driver abstraction.
//!
//! This module defines the capability set the contexts need from an underlying document
//! store driver, so that any driver exposing it is substitutable:
//!
//! - [`StoreClient`]: construct a client from a connection specifier and hand out database
//!   handles by name
//! - [`StoreDatabase`]: issue document operations against a named collection, drop a
//!   collection by name, list collections
//!
//! Documents cross this boundary in their stored form: a BSON document whose `_id` field
//! already holds the encoded key. Drivers never see typed documents.
//!
//! # Thread Safety
//!
//! Client and database handles must be cheap to clone and safe for concurrent use once
//! constructed. The contexts share them across tasks without further locking.

use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document};

use crate::{encoding::ClientSettings, error::DocumentStoreResult};

/// A connected (or lazily connecting) driver client.
#[async_trait]
pub trait StoreClient: Send + Sync + Debug + Sized + 'static {
    /// Database handle type produced by this client.
    type Database: StoreDatabase;

    /// Constructs a client from a connection specifier.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Connection`](crate::error::DocumentStoreError::Connection)
    /// if the specifier is malformed or the client cannot be constructed.
    async fn connect(dsn: &str, settings: Arc<ClientSettings>) -> DocumentStoreResult<Self>;

    /// Settings shared with every database handle this client produces.
    fn settings(&self) -> &Arc<ClientSettings>;

    /// Returns a handle to the named database. Never performs I/O.
    fn database(&self, name: &str) -> Self::Database;

    /// Cleanly shuts down the client, releasing connections.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()> {
        Ok(())
    }
}

/// A handle to one database of a store.
///
/// Every operation addresses a collection by name. Operations against a collection that
/// does not exist behave as against an empty collection; inserts create it.
#[async_trait]
pub trait StoreDatabase: Send + Sync + Debug + Clone + 'static {
    /// Name of the database.
    fn name(&self) -> &str;

    /// Settings of the client this handle was obtained from.
    fn settings(&self) -> &Arc<ClientSettings>;

    /// Inserts stored documents. Fails with
    /// [`DocumentAlreadyExists`](crate::error::DocumentStoreError::DocumentAlreadyExists)
    /// when a document with the same `_id` exists.
    async fn insert_documents(
        &self,
        documents: Vec<Document>,
        collection: &str,
    ) -> DocumentStoreResult<()>;

    /// Fetches the document with the given `_id`.
    async fn find_document(&self, id: Bson, collection: &str) -> DocumentStoreResult<Option<Document>>;

    /// Fetches every document of the collection.
    async fn find_documents(&self, collection: &str) -> DocumentStoreResult<Vec<Document>>;

    /// Counts the documents of the collection.
    async fn count_documents(&self, collection: &str) -> DocumentStoreResult<u64>;

    /// Replaces the document with the given `_id`. Returns whether a document matched.
    async fn replace_document(
        &self,
        id: Bson,
        document: Document,
        collection: &str,
    ) -> DocumentStoreResult<bool>;

    /// Deletes the documents with the given `_id`s. Returns how many were removed.
    async fn delete_documents(&self, ids: Vec<Bson>, collection: &str) -> DocumentStoreResult<u64>;

    /// Drops a collection and all its documents. Dropping a missing collection succeeds.
    ///
    /// # Warning
    ///
    /// This operation is irreversible.
    async fn drop_collection(&self, name: &str) -> DocumentStoreResult<()>;

    /// Lists the names of all collections in the database.
    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>>;
}
