//! Serializable context configuration.
//!
//! Applications usually keep the connection string, database name and identifier encoding
//! in their own configuration files. [`ContextConfig`] is the shape those settings take;
//! hand it to [`DbContext::from_config`](crate::context::DbContext::from_config) at startup.
//!
//! ```ignore
//! let config = ContextConfig::from_json_str(r#"{
//!     "connection_string": "mongodb://localhost:27017",
//!     "database": "orders",
//!     "id_encoding": "c_sharp_legacy"
//! }"#)?;
//!
//! let context = DbContext::<MongoClient>::from_config(&config).await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    encoding::IdEncoding,
    error::{DocumentStoreError, DocumentStoreResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Connection specifier in the driver's URI scheme.
    pub connection_string: String,
    /// Database to bind eagerly. When absent the context starts unbound.
    #[serde(default)]
    pub database: Option<String>,
    /// Identifier encoding the client starts with.
    #[serde(default)]
    pub id_encoding: IdEncoding,
}

impl ContextConfig {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            database: None,
            id_encoding: IdEncoding::default(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_id_encoding(mut self, id_encoding: IdEncoding) -> Self {
        self.id_encoding = id_encoding;
        self
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Config`] if the JSON is invalid or misses the
    /// connection string.
    pub fn from_json_str(json: &str) -> DocumentStoreResult<Self> {
        serde_json::from_str(json).map_err(|e| DocumentStoreError::Config(e.to_string()))
    }

    /// Reads a configuration from a JSON value, e.g. a section of a larger config file.
    pub fn from_json_value(value: serde_json::Value) -> DocumentStoreResult<Self> {
        serde_json::from_value(value).map_err(|e| DocumentStoreError::Config(e.to_string()))
    }
}
