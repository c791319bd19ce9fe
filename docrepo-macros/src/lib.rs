//! Procedural macros for the docrepo project.
//!
//! # `Document`
//!
//! Derives `docrepo::document::Document` for a struct with named fields.
//!
//! - The key is the field named `id`, the field marked `#[document(id)]`, or the field
//!   named by `#[document(id = "...")]` on the struct. Its type becomes `Document::Key`.
//! - `#[document(collection = "...")]` sets an explicit collection name. Without it the
//!   collection name is the pluralized, camelized struct name.
//!
//! ```ignore
//! use docrepo::Document;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Document)]
//! #[document(collection = "custom_orders")]
//! pub struct Order {
//!     #[document(id)]
//!     pub number: String,
//!     pub total: i64,
//! }
//! ```

mod document;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match document::generate_document(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
