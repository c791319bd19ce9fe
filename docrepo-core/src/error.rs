//! Error types and result types for repository and context operations.
//!
//! Every fallible operation in this crate returns [`DocumentStoreResult<T>`]. Configuration
//! mistakes (a missing database binding, a bad connection string, a late encoding change)
//! get their own variants so they can be told apart from transient driver failures, which
//! are passed through as [`DocumentStoreError::Backend`].

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when resolving contexts and collections
/// or issuing document operations.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// The connection specifier is malformed or the driver client could not be constructed.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A collection was requested from a context that has no database handle yet.
    #[error("Database context not configured: no database handle has been bound")]
    DatabaseNotBound,
    /// A context that is already bound was asked to bind to a different database.
    #[error("Database context already bound to {bound}, cannot rebind to {requested}")]
    DatabaseAlreadyBound {
        bound: String,
        requested: String,
    },
    /// The identifier encoding was changed after document traffic had started.
    #[error("Client settings are sealed: identifier encoding must be set before any traffic")]
    ConfigurationSealed,
    /// The context configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A document with the given ID already exists in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// An error occurred in the underlying store driver.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<BsonError> for DocumentStoreError {
    fn from(err: BsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
