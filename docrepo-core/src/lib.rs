//! Collection resolution and context lifecycle for document databases.
//!
//! This crate is the core of the docrepo project and provides:
//!
//! - **Document traits** ([`document`]) - Keys, collection-name overrides and stored form
//! - **Collection naming** ([`naming`]) - Override, pluralization and partition prefixing
//! - **Identifier encoding** ([`encoding`]) - Client-wide UUID representation settings
//! - **Driver abstraction** ([`driver`]) - The capability set required from a store driver
//! - **Client context** ([`client`]) - The shared driver client and its settings
//! - **Database contexts** ([`context`]) - Database binding and typed collection access
//! - **Collections** ([`collection`]) - Typed collection handles
//! - **Repository** ([`repository`]) - Key-typed pass-through operations
//! - **Configuration** ([`config`]) - Serializable context configuration
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docrepo::{prelude::*, memory::MemoryClient};
//! use bson::Uuid;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct OrderLine {
//!     pub id: Uuid,
//!     pub sku: String,
//! }
//!
//! impl Document for OrderLine {
//!     type Key = Uuid;
//!
//!     fn id(&self) -> &Uuid {
//!         &self.id
//!     }
//! }
//!
//! let context = DbContext::<MemoryClient>::connect("memory://", "shop").await?;
//! let lines = context.collection::<OrderLine>(Some("tenantA"))?;
//! assert_eq!(lines.name(), "tenantA-orderLines");
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_core;

pub mod client;
pub mod collection;
pub mod config;
pub mod context;
pub mod document;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod naming;
pub mod repository;
