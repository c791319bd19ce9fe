//! Convenient re-exports of commonly used types from docrepo.
//!
//! ```ignore
//! use docrepo::prelude::*;
//! ```

pub use docrepo_core::{
    client::{ClientContext, ClientContextBuilder},
    collection::Collection,
    config::ContextConfig,
    context::{DatabaseContext, DbContext},
    document::{Document, DocumentExt, DocumentKey},
    driver::{StoreClient, StoreDatabase},
    encoding::{ClientSettings, IdEncoding},
    error::{DocumentStoreError, DocumentStoreResult},
    naming::resolve_collection_name,
    repository::Repository,
};
pub use docrepo_macros::Document;
