//! Core traits for document types and their identifiers.
//!
//! A document type names its key type, exposes its identifier, and may declare an explicit
//! collection name. Everything else about where it is stored is decided by
//! [`naming`](crate::naming).

use std::fmt::Debug;

use bson::{Binary, Bson, de::deserialize_from_bson, oid::ObjectId, ser::serialize_to_bson};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    encoding::IdEncoding,
    error::{DocumentStoreError, DocumentStoreResult},
    naming::short_type_name,
};

/// Name of the field the store uses for the primary key.
pub const ID_FIELD: &str = "_id";

/// Core trait that all documents stored through a context must implement.
///
/// The store keeps the encoded key in its own `_id` field and strips it again on read, so
/// the document's own identifier field must not be serialized as `_id`.
///
/// # Example
///
/// ```ignore
/// use docrepo::document::Document;
/// use bson::Uuid;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct OrderLine {
///     pub id: Uuid,
///     pub sku: String,
/// }
///
/// impl Document for OrderLine {
///     type Key = Uuid;
///
///     fn id(&self) -> &Uuid {
///         &self.id
///     }
/// }
///
/// // Stored in "orderLines"
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// The primary key type.
    type Key: DocumentKey;

    /// Returns a reference to this document's identifier.
    fn id(&self) -> &Self::Key;

    /// Explicit collection name, used verbatim instead of the pluralized type name.
    fn collection_name() -> Option<&'static str> {
        None
    }

    /// Simple name of the type, without module path or generic arguments.
    fn type_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Identifier types usable as a document key.
pub trait DocumentKey: Clone + Eq + Debug + Send + Sync + 'static {
    /// Converts the key to the BSON value stored in `_id`.
    fn to_bson(&self, encoding: IdEncoding) -> Bson;
}

impl DocumentKey for bson::Uuid {
    fn to_bson(&self, encoding: IdEncoding) -> Bson {
        Bson::Binary(Binary::from_uuid_with_representation(
            *self,
            encoding.uuid_representation(),
        ))
    }
}

impl DocumentKey for uuid::Uuid {
    fn to_bson(&self, encoding: IdEncoding) -> Bson {
        bson::Uuid::from(*self).to_bson(encoding)
    }
}

impl DocumentKey for ObjectId {
    fn to_bson(&self, _encoding: IdEncoding) -> Bson {
        Bson::ObjectId(*self)
    }
}

impl DocumentKey for String {
    fn to_bson(&self, _encoding: IdEncoding) -> Bson {
        Bson::String(self.clone())
    }
}

impl DocumentKey for i32 {
    fn to_bson(&self, _encoding: IdEncoding) -> Bson {
        Bson::Int32(*self)
    }
}

impl DocumentKey for i64 {
    fn to_bson(&self, _encoding: IdEncoding) -> Bson {
        Bson::Int64(*self)
    }
}

/// Conversion between documents and their stored BSON form.
///
/// Implemented for every [`Document`].
pub trait DocumentExt: Document {
    /// Serializes the document and adds the encoded key under `_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the document does not serialize to a
    /// BSON document.
    fn to_stored(&self, encoding: IdEncoding) -> DocumentStoreResult<bson::Document>;

    /// Deserializes a stored document, ignoring the store's `_id` field.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    fn from_stored(document: bson::Document) -> DocumentStoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_stored(&self, encoding: IdEncoding) -> DocumentStoreResult<bson::Document> {
        let mut stored = match serialize_to_bson(self)? {
            Bson::Document(document) => document,
            other => {
                return Err(DocumentStoreError::Serialization(format!(
                    "{} serialized to {:?}, expected a document",
                    D::type_name(),
                    other.element_type()
                )));
            }
        };

        stored.insert(ID_FIELD, self.id().to_bson(encoding));

        Ok(stored)
    }

    fn from_stored(mut document: bson::Document) -> DocumentStoreResult<Self> {
        document.remove(ID_FIELD);

        Ok(deserialize_from_bson(Bson::Document(document))?)
    }
}
