//! Typed collection handles.
//!
//! A [`Collection`] addresses one physical collection of one database and converts between
//! a document type and its stored form. Handles are obtained from a
//! [`DatabaseContext`](crate::context::DatabaseContext); they own a clone of the database
//! handle, so they can be moved into tasks freely.
//!
//! # Example
//!
//! ```ignore
//! let lines = context.collection::<OrderLine>(Some("tenantA"))?;
//! assert_eq!(lines.name(), "tenantA-orderLines");
//!
//! lines.insert_one(&line).await?;
//! let found = lines.find_one(&line.id).await?;
//! ```

use std::marker::PhantomData;

use crate::{
    document::{Document, DocumentExt, DocumentKey},
    driver::StoreDatabase,
    error::DocumentStoreResult,
};

/// A typed handle to a named collection.
#[derive(Debug)]
pub struct Collection<D: Document, Db: StoreDatabase> {
    name: String,
    database: Db,
    _marker: PhantomData<fn() -> D>,
}

impl<D: Document, Db: StoreDatabase> Clone for Collection<D, Db> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone(), self.database.clone())
    }
}

impl<D: Document, Db: StoreDatabase> Collection<D, Db> {
    pub(crate) fn new(name: String, database: Db) -> Self {
        Self { name, database, _marker: PhantomData }
    }

    /// Returns the physical name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the database handle this collection belongs to.
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Converts this handle to a different document type on the same collection.
    pub fn with_type<T: Document>(&self) -> Collection<T, Db> {
        Collection::new(self.name.clone(), self.database.clone())
    }

    /// Inserts one document.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if serialization
    /// fails or a document with the same key exists.
    pub async fn insert_one(&self, document: &D) -> DocumentStoreResult<()> {
        let encoding = self.database.settings().id_encoding();

        self.database
            .insert_documents(vec![document.to_stored(encoding)?], &self.name)
            .await
    }

    /// Inserts several documents in one driver call.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if serialization
    /// or insertion fails.
    pub async fn insert_many(&self, documents: &[D]) -> DocumentStoreResult<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let encoding = self.database.settings().id_encoding();

        self.database
            .insert_documents(
                documents
                    .iter()
                    .map(|d| d.to_stored(encoding))
                    .collect::<DocumentStoreResult<Vec<_>>>()?,
                &self.name,
            )
            .await
    }

    /// Finds the document with the given key.
    pub async fn find_one(&self, id: &D::Key) -> DocumentStoreResult<Option<D>> {
        let encoding = self.database.settings().id_encoding();

        self.database
            .find_document(id.to_bson(encoding), &self.name)
            .await?
            .map(D::from_stored)
            .transpose()
    }

    /// Returns every document of the collection.
    pub async fn find_all(&self) -> DocumentStoreResult<Vec<D>> {
        self.database
            .find_documents(&self.name)
            .await?
            .into_iter()
            .map(D::from_stored)
            .collect()
    }

    /// Counts the documents of the collection.
    pub async fn count(&self) -> DocumentStoreResult<u64> {
        self.database.count_documents(&self.name).await
    }

    /// Replaces the stored document that has the same key. Returns whether one matched.
    pub async fn replace_one(&self, document: &D) -> DocumentStoreResult<bool> {
        let encoding = self.database.settings().id_encoding();

        self.database
            .replace_document(
                document.id().to_bson(encoding),
                document.to_stored(encoding)?,
                &self.name,
            )
            .await
    }

    /// Deletes the document with the given key. Returns whether one was removed.
    pub async fn delete_one(&self, id: &D::Key) -> DocumentStoreResult<bool> {
        let encoding = self.database.settings().id_encoding();

        Ok(self
            .database
            .delete_documents(vec![id.to_bson(encoding)], &self.name)
            .await?
            > 0)
    }

    /// Deletes the documents with the given keys. Returns how many were removed.
    pub async fn delete_many(&self, ids: &[D::Key]) -> DocumentStoreResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let encoding = self.database.settings().id_encoding();

        self.database
            .delete_documents(
                ids.iter()
                    .map(|id| id.to_bson(encoding))
                    .collect(),
                &self.name,
            )
            .await
    }
}
