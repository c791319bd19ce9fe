//! Generic repository.
//!
//! A [`Repository`] holds one [`DatabaseContext`] and exposes the common document
//! operations for any [`Document`] type. Each call resolves its collection again, so a
//! repository can be shared by every caller of the application and still follow partition
//! keys and per-request database selection.
//!
//! # Example
//!
//! ```ignore
//! let repository =
//!     Repository::<DbContext<MongoClient>>::connect("mongodb://localhost:27017", "shop").await?;
//!
//! repository.add_one(&line, Some("tenantA")).await?;
//! let line = repository.get_by_id::<OrderLine>(&id, Some("tenantA")).await?;
//! ```

use std::sync::Arc;

use crate::{
    context::{DatabaseContext, DbContext},
    document::Document,
    driver::StoreClient,
    error::DocumentStoreResult,
};

/// A long-lived, shareable repository over one database context.
#[derive(Debug)]
pub struct Repository<X: DatabaseContext> {
    context: Arc<X>,
}

impl<X: DatabaseContext> Clone for Repository<X> {
    fn clone(&self) -> Self {
        Self { context: Arc::clone(&self.context) }
    }
}

impl<C: StoreClient> Repository<DbContext<C>> {
    /// Connects a fresh client and binds a repository to the named database.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Connection`](crate::error::DocumentStoreError::Connection)
    /// if the client cannot be constructed.
    pub async fn connect(dsn: &str, database: &str) -> DocumentStoreResult<Self> {
        Ok(Self::new(DbContext::connect(dsn, database).await?))
    }
}

impl<X: DatabaseContext> Repository<X> {
    pub fn new(context: X) -> Self {
        Self { context: Arc::new(context) }
    }

    /// Creates a repository over a context that is already shared.
    pub fn from_shared(context: Arc<X>) -> Self {
        Self { context }
    }

    /// The database context.
    pub fn context(&self) -> &Arc<X> {
        &self.context
    }

    /// Inserts a document.
    pub async fn add_one<D: Document>(
        &self,
        document: &D,
        partition_key: Option<&str>,
    ) -> DocumentStoreResult<()> {
        self.context
            .collection::<D>(partition_key)?
            .insert_one(document)
            .await
    }

    /// Inserts several documents.
    pub async fn add_many<D: Document>(
        &self,
        documents: &[D],
        partition_key: Option<&str>,
    ) -> DocumentStoreResult<()> {
        self.context
            .collection::<D>(partition_key)?
            .insert_many(documents)
            .await
    }

    /// Fetches a document by key.
    pub async fn get_by_id<D: Document>(
        &self,
        id: &D::Key,
        partition_key: Option<&str>,
    ) -> DocumentStoreResult<Option<D>> {
        self.context
            .collection::<D>(partition_key)?
            .find_one(id)
            .await
    }

    /// Fetches every document of the type.
    pub async fn get_all<D: Document>(&self, partition_key: Option<&str>) -> DocumentStoreResult<Vec<D>> {
        self.context
            .collection::<D>(partition_key)?
            .find_all()
            .await
    }

    /// Counts the documents of the type.
    pub async fn count<D: Document>(&self, partition_key: Option<&str>) -> DocumentStoreResult<u64> {
        self.context
            .collection::<D>(partition_key)?
            .count()
            .await
    }

    /// Replaces the stored document with the same key. Returns whether one matched.
    pub async fn update_one<D: Document>(
        &self,
        document: &D,
        partition_key: Option<&str>,
    ) -> DocumentStoreResult<bool> {
        self.context
            .collection::<D>(partition_key)?
            .replace_one(document)
            .await
    }

    /// Deletes a document by key. Returns whether one was removed.
    pub async fn delete_one<D: Document>(
        &self,
        id: &D::Key,
        partition_key: Option<&str>,
    ) -> DocumentStoreResult<bool> {
        self.context
            .collection::<D>(partition_key)?
            .delete_one(id)
            .await
    }

    /// Deletes documents by key. Returns how many were removed.
    pub async fn delete_many<D: Document>(
        &self,
        ids: &[D::Key],
        partition_key: Option<&str>,
    ) -> DocumentStoreResult<u64> {
        self.context
            .collection::<D>(partition_key)?
            .delete_many(ids)
            .await
    }

    /// Drops the collection of the type. Irreversible.
    pub async fn drop_collection<D: Document>(&self, partition_key: Option<&str>) -> DocumentStoreResult<()> {
        self.context.drop_collection::<D>(partition_key).await
    }
}
