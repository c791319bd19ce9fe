//! MongoDB store driver for docrepo.
//!
//! This crate implements the docrepo driver traits on top of the official `mongodb` crate,
//! so database contexts and repositories can run against MongoDB Atlas or a self-hosted
//! server.
//!
//! To use this driver, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docrepo = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! Connection strings are parsed eagerly when the client context is built; a malformed
//! string fails with a connection error right away. The driver only talks to the server on
//! the first operation. `mongodb+srv://` strings resolve their DNS records during parsing.
//!
//! # Example
//!
//! ```ignore
//! use docrepo::{prelude::*, mongodb::MongoClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = DbContext::<MongoClient>::connect("mongodb://localhost:27017", "shop").await?;
//!     let lines = context.collection::<OrderLine>(Some("tenantA"))?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docrepo_mongodb;

pub mod store;

pub use store::{MongoClient, MongoDatabase};
