//! The shared client context.
//!
//! A [`ClientContext`] owns the one driver client of a process (or logical shard) together
//! with the [`ClientSettings`] every handle derived from it reads. Construct it once at
//! startup, configure the identifier encoding before issuing any traffic, and share it by
//! `Arc` between [`DbContext`](crate::context::DbContext)s.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docrepo::{prelude::*, mongodb::MongoClient};
//!
//! let client = ClientContext::<MongoClient>::builder("mongodb://localhost:27017")
//!     .id_encoding(IdEncoding::CSharpLegacy)
//!     .build()
//!     .await?;
//!
//! let orders = DbContext::with_database(Arc::new(client), "orders");
//! ```

use std::sync::Arc;

use crate::{
    driver::StoreClient,
    encoding::{ClientSettings, IdEncoding},
    error::DocumentStoreResult,
};

/// Owner of a single driver client and its settings.
#[derive(Debug)]
pub struct ClientContext<C: StoreClient> {
    client: C,
}

impl<C: StoreClient> ClientContext<C> {
    /// Connects with the default [`IdEncoding::Standard`] encoding.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Connection`](crate::error::DocumentStoreError::Connection)
    /// if the specifier is malformed or the driver cannot construct a client.
    pub async fn connect(dsn: &str) -> DocumentStoreResult<Self> {
        Self::builder(dsn).build().await
    }

    /// Creates a builder for a client context.
    pub fn builder(dsn: &str) -> ClientContextBuilder<C> {
        ClientContextBuilder::new(dsn)
    }

    /// Wraps an already-constructed driver client, keeping the client's own settings.
    pub fn from_client(client: C) -> Self {
        Self { client }
    }

    /// The driver client. Read-only: contexts borrow it, they never replace it.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Settings shared by every handle derived from this client.
    pub fn settings(&self) -> &Arc<ClientSettings> {
        self.client.settings()
    }

    /// The configured identifier encoding.
    pub fn id_encoding(&self) -> IdEncoding {
        self.settings().peek_id_encoding()
    }

    /// Overwrites the identifier encoding for this client and everything derived from it,
    /// including contexts and collection handles that already exist.
    ///
    /// Data already written is never re-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::ConfigurationSealed`](crate::error::DocumentStoreError::ConfigurationSealed)
    /// once a document operation has been issued through this client.
    pub fn set_id_encoding(&self, id_encoding: IdEncoding) -> DocumentStoreResult<()> {
        self.settings().set_id_encoding(id_encoding)
    }

    /// Returns a handle to the named database.
    pub fn database(&self, name: &str) -> C::Database {
        self.client.database(name)
    }

    /// Shuts the client down. Consumes the context; shared contexts must be unwrapped from
    /// their `Arc` first.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.client.shutdown().await
    }
}

/// Builder for [`ClientContext`].
pub struct ClientContextBuilder<C: StoreClient> {
    dsn: String,
    id_encoding: IdEncoding,
    _client: std::marker::PhantomData<fn() -> C>,
}

impl<C: StoreClient> ClientContextBuilder<C> {
    pub fn new(dsn: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            id_encoding: IdEncoding::Standard,
            _client: std::marker::PhantomData,
        }
    }

    /// Sets the identifier encoding the client starts with.
    pub fn id_encoding(mut self, id_encoding: IdEncoding) -> Self {
        self.id_encoding = id_encoding;
        self
    }

    pub async fn build(self) -> DocumentStoreResult<ClientContext<C>> {
        let settings = Arc::new(ClientSettings::new(self.id_encoding));
        let client = C::connect(&self.dsn, settings).await?;

        tracing::info!(id_encoding = ?self.id_encoding, "client context constructed");

        Ok(ClientContext { client })
    }
}
