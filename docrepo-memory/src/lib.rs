//! In-memory store driver for docrepo.
//!
//! This crate provides a thread-safe, in-memory implementation of the driver traits
//! ([`StoreClient`](docrepo_core::driver::StoreClient) and
//! [`StoreDatabase`](docrepo_core::driver::StoreDatabase)). It uses async-aware read-write
//! locks for concurrent access and is meant for tests and development.
//!
//! Connection specifiers use the `memory://` scheme; anything after it is ignored.
//!
//! # Quick Start
//!
//! ```ignore
//! use docrepo::{prelude::*, memory::MemoryClient};
//!
//! #[tokio::main]
//! async fn main() -> DocumentStoreResult<()> {
//!     let repository = Repository::<DbContext<MemoryClient>>::connect("memory://", "shop").await?;
//!     repository.add_one(&line, None).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_memory;

pub mod store;

pub use store::{MEMORY_SCHEME, MemoryClient, MemoryDatabase};
