//! Database contexts.
//!
//! A database context binds a client to one database and hands out typed collection
//! handles, resolving collection names with [`naming`](crate::naming).
//!
//! - [`DatabaseContext`] - the trait repositories consume; override `database()` for
//!   per-call (per-tenant) database selection
//! - [`DbContext`] - the standard context, bound to a single database eagerly or lazily
//!
//! # Binding
//!
//! [`DbContext`] can be constructed three ways:
//!
//! - from a shared [`ClientContext`] and a database name ([`DbContext::with_database`]),
//!   binding immediately
//! - from a connection specifier and a database name ([`DbContext::connect`]), which builds
//!   a fresh client context and then binds immediately
//! - from an already-resolved database handle ([`DbContext::from_database`]), bypassing the
//!   client entirely
//!
//! [`DbContext::new`] leaves the context unbound until [`DbContext::bind`] is called. Binding
//! happens at most once; collection access before that fails with
//! [`DocumentStoreError::DatabaseNotBound`].

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::{
    client::ClientContext,
    collection::Collection,
    config::ContextConfig,
    document::Document,
    driver::{StoreClient, StoreDatabase},
    error::{DocumentStoreError, DocumentStoreResult},
    naming::resolve_collection_name,
};

/// Source of database handles and typed collections.
///
/// Implementors supply [`database`](DatabaseContext::database); collection resolution and
/// dropping are provided on top of it. A context that picks its database per request (for
/// example from a tenant stored in task-local state) overrides `database()` instead of
/// mutating shared state.
#[async_trait]
pub trait DatabaseContext: Send + Sync {
    /// Database handle type.
    type Database: StoreDatabase;

    /// Returns the database handle collections are resolved against.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::DatabaseNotBound`] if no database has been resolved.
    fn database(&self) -> DocumentStoreResult<Self::Database>;

    /// Returns the collection name for `D` in an optional partition.
    fn collection_name<D: Document>(&self, partition_key: Option<&str>) -> String {
        resolve_collection_name::<D>(partition_key)
    }

    /// Returns a typed handle to the collection backing `D` in an optional partition.
    ///
    /// Has no side effects; the collection is created by the store on first write.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::DatabaseNotBound`] if no database has been resolved.
    fn collection<D: Document>(
        &self,
        partition_key: Option<&str>,
    ) -> DocumentStoreResult<Collection<D, Self::Database>> {
        let database = self.database()?;

        Ok(Collection::new(self.collection_name::<D>(partition_key), database))
    }

    /// Drops the collection backing `D` in an optional partition.
    ///
    /// There is no confirmation and no soft delete. Dropping a collection that does not
    /// exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::DatabaseNotBound`] if no database has been resolved, or
    /// the driver's error if the drop fails.
    async fn drop_collection<D: Document>(&self, partition_key: Option<&str>) -> DocumentStoreResult<()> {
        let database = self.database()?;
        let name = self.collection_name::<D>(partition_key);

        tracing::warn!(database = database.name(), collection = %name, "dropping collection");

        database.drop_collection(&name).await
    }
}

/// The standard database context.
///
/// Holds an optional shared [`ClientContext`] and a database handle that is set at most once.
#[derive(Debug)]
pub struct DbContext<C: StoreClient> {
    client: Option<Arc<ClientContext<C>>>,
    database: OnceLock<C::Database>,
}

impl<C: StoreClient> DbContext<C> {
    /// Creates an unbound context on a shared client. Call [`bind`](Self::bind) before use.
    pub fn new(client: Arc<ClientContext<C>>) -> Self {
        Self {
            client: Some(client),
            database: OnceLock::new(),
        }
    }

    /// Creates a context on a shared client, bound to the named database immediately.
    pub fn with_database(client: Arc<ClientContext<C>>, database: &str) -> Self {
        let handle = client.database(database);

        tracing::debug!(database, "database context bound");

        Self {
            client: Some(client),
            database: OnceLock::from(handle),
        }
    }

    /// Builds a fresh client context from a connection specifier, then binds to the named
    /// database immediately.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Connection`] if the client cannot be constructed.
    pub async fn connect(dsn: &str, database: &str) -> DocumentStoreResult<Self> {
        let client = ClientContext::connect(dsn).await?;

        Ok(Self::with_database(Arc::new(client), database))
    }

    /// Builds a context from a [`ContextConfig`]. The context is bound when the config
    /// names a database and unbound otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Connection`] if the client cannot be constructed.
    pub async fn from_config(config: &ContextConfig) -> DocumentStoreResult<Self> {
        let client = Arc::new(
            ClientContext::builder(&config.connection_string)
                .id_encoding(config.id_encoding)
                .build()
                .await?,
        );

        Ok(match &config.database {
            Some(database) => Self::with_database(client, database),
            None => Self::new(client),
        })
    }

    /// Creates a context around an existing database handle, without a client context.
    pub fn from_database(database: C::Database) -> Self {
        Self {
            client: None,
            database: OnceLock::from(database),
        }
    }

    /// The client context, if this context was built from one.
    pub fn client_context(&self) -> Option<&Arc<ClientContext<C>>> {
        self.client.as_ref()
    }

    /// Whether a database handle has been resolved.
    pub fn is_bound(&self) -> bool {
        self.database.get().is_some()
    }

    /// Resolves the database handle from a name, once.
    ///
    /// Binding to the name that is already bound is a no-op, so concurrent callers binding
    /// the same database all observe the same handle.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::DatabaseAlreadyBound`] if a different database is bound,
    /// and [`DocumentStoreError::DatabaseNotBound`] if the context has no client to resolve
    /// names with.
    pub fn bind(&self, database: &str) -> DocumentStoreResult<&C::Database> {
        let client = match (&self.client, self.database.get()) {
            (_, Some(bound)) => return Self::check_same(bound, database),
            (Some(client), None) => client,
            (None, None) => return Err(DocumentStoreError::DatabaseNotBound),
        };

        let bound = self.database.get_or_init(|| {
            tracing::debug!(database, "database context bound lazily");
            client.database(database)
        });

        Self::check_same(bound, database)
    }

    fn check_same<'a>(bound: &'a C::Database, requested: &str) -> DocumentStoreResult<&'a C::Database> {
        if bound.name() == requested {
            Ok(bound)
        } else {
            Err(DocumentStoreError::DatabaseAlreadyBound {
                bound: bound.name().to_string(),
                requested: requested.to_string(),
            })
        }
    }
}

impl<C: StoreClient> DatabaseContext for DbContext<C> {
    type Database = C::Database;

    fn database(&self) -> DocumentStoreResult<C::Database> {
        self.database
            .get()
            .cloned()
            .ok_or(DocumentStoreError::DatabaseNotBound)
    }
}
