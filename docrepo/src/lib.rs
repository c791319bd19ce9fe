//! Main docrepo crate: a generic repository layer over document databases.
//!
//! This crate is the primary entry point for users of the docrepo framework. It re-exports
//! the core types from the sub-crates, the `Document` derive macro, and the store drivers.
//!
//! # Features
//!
//! - **Convention-based collection names** - `OrderLine` is stored in `orderLines` unless the
//!   type declares its own collection name
//! - **Partitioned collections** - a partition key prefixes the collection name, so one type
//!   can be spread over one collection per tenant
//! - **Shared contexts** - one client context per process, one database context per database,
//!   both shared by `Arc`
//! - **Identifier encoding** - configure the UUID representation once, before traffic
//! - **Multiple drivers** - in-memory and MongoDB, behind a small trait boundary
//!
//! # Quick Start
//!
//! ```ignore
//! use docrepo::{prelude::*, memory::MemoryClient};
//! use bson::Uuid;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Document)]
//! pub struct OrderLine {
//!     pub id: Uuid,
//!     pub sku: String,
//!     pub quantity: u32,
//! }
//!
//! #[tokio::main]
//! async fn main() -> DocumentStoreResult<()> {
//!     let repository = Repository::<DbContext<MemoryClient>>::connect("memory://", "shop").await?;
//!
//!     let line = OrderLine { id: Uuid::new(), sku: "A-1".into(), quantity: 2 };
//!
//!     // Stored in "tenantA-orderLines"
//!     repository.add_one(&line, Some("tenantA")).await?;
//!
//!     let found = repository.get_by_id::<OrderLine>(&line.id, Some("tenantA")).await?;
//!     assert!(found.is_some());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Sharing a client
//!
//! Several database contexts can share one client context. The identifier encoding is set on
//! the client and applies to every context built on it.
//!
//! ```ignore
//! use std::sync::Arc;
//! use docrepo::{prelude::*, memory::MemoryClient};
//!
//! let client = Arc::new(
//!     ClientContext::<MemoryClient>::builder("memory://")
//!         .id_encoding(IdEncoding::CSharpLegacy)
//!         .build()
//!         .await?,
//! );
//!
//! let shop = DbContext::with_database(Arc::clone(&client), "shop");
//! let audit = DbContext::with_database(client, "audit");
//! ```
//!
//! # Per-request databases
//!
//! Contexts that choose their database per call implement [`context::DatabaseContext`]
//! themselves and override `database()`:
//!
//! ```ignore
//! struct TenantContext {
//!     client: Arc<ClientContext<MongoClient>>,
//! }
//!
//! impl DatabaseContext for TenantContext {
//!     type Database = MongoDatabase;
//!
//!     fn database(&self) -> DocumentStoreResult<MongoDatabase> {
//!         let tenant = CURRENT_TENANT.try_with(|t| t.clone())
//!             .map_err(|_| DocumentStoreError::DatabaseNotBound)?;
//!         Ok(self.client.database(&tenant))
//!     }
//! }
//! ```
//!
//! # Drivers
//!
//! - [`memory`] - In-memory driver for development and testing
//! - [`mongodb`] - MongoDB driver (requires the `mongodb` feature)

#[allow(unused_extern_crates)]
extern crate self as docrepo;

pub mod prelude;

pub use docrepo_core::{
    client, collection, config, context, document, driver, encoding, error, naming, repository,
};
pub use docrepo_macros::Document;

// Re-export BSON types and the async-trait macro for driver and context implementors
pub use async_trait::async_trait;
pub use bson;

/// In-memory driver.
pub mod memory {
    pub use docrepo_memory::{MEMORY_SCHEME, MemoryClient, MemoryDatabase};
}

/// MongoDB driver.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docrepo_mongodb::{MongoClient, MongoDatabase};
}
