//! Identifier encoding and the client-wide settings that carry it.
//!
//! The binary layout used for UUID identifiers must be the same for every writer and reader
//! of a collection. [`ClientSettings`] holds that choice for one client and everything derived
//! from it (database handles, contexts, collection handles). The setting may be changed until
//! the first document operation reads it; after that it is sealed.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use bson::uuid::UuidRepresentation;
use serde::{Deserialize, Serialize};

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Binary representation used when a UUID key is written to the store.
///
/// `Standard` writes BSON binary subtype 4 in RFC 4122 byte order. The legacy modes write
/// subtype 3 with the byte order the corresponding legacy driver used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdEncoding {
    #[default]
    Standard,
    CSharpLegacy,
    JavaLegacy,
    PythonLegacy,
}

impl IdEncoding {
    fn to_u8(self) -> u8 {
        match self {
            IdEncoding::Standard => 0,
            IdEncoding::CSharpLegacy => 1,
            IdEncoding::JavaLegacy => 2,
            IdEncoding::PythonLegacy => 3,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => IdEncoding::CSharpLegacy,
            2 => IdEncoding::JavaLegacy,
            3 => IdEncoding::PythonLegacy,
            _ => IdEncoding::Standard,
        }
    }

    /// Returns the matching BSON UUID representation.
    pub fn uuid_representation(self) -> UuidRepresentation {
        match self {
            IdEncoding::Standard => UuidRepresentation::Standard,
            IdEncoding::CSharpLegacy => UuidRepresentation::CSharpLegacy,
            IdEncoding::JavaLegacy => UuidRepresentation::JavaLegacy,
            IdEncoding::PythonLegacy => UuidRepresentation::PythonLegacy,
        }
    }
}

/// Settings shared by a client and every handle derived from it.
///
/// Created once at the composition root ([`ClientContext`](crate::client::ClientContext)) and
/// shared by `Arc`. Writes are only accepted before the first document operation.
#[derive(Debug)]
pub struct ClientSettings {
    id_encoding: AtomicU8,
    sealed: AtomicBool,
}

impl ClientSettings {
    pub fn new(id_encoding: IdEncoding) -> Self {
        Self {
            id_encoding: AtomicU8::new(id_encoding.to_u8()),
            sealed: AtomicBool::new(false),
        }
    }

    /// Returns the encoding used for document traffic and seals the settings.
    ///
    /// Called by collection handles on every operation.
    pub fn id_encoding(&self) -> IdEncoding {
        self.sealed.store(true, Ordering::Release);
        IdEncoding::from_u8(self.id_encoding.load(Ordering::Acquire))
    }

    /// Returns the configured encoding without sealing.
    pub fn peek_id_encoding(&self) -> IdEncoding {
        IdEncoding::from_u8(self.id_encoding.load(Ordering::Acquire))
    }

    /// Overwrites the identifier encoding.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::ConfigurationSealed`] once any document operation has
    /// been issued through a handle sharing these settings.
    pub fn set_id_encoding(&self, id_encoding: IdEncoding) -> DocumentStoreResult<()> {
        if self.is_sealed() {
            tracing::warn!(?id_encoding, "rejected identifier encoding change after traffic started");
            return Err(DocumentStoreError::ConfigurationSealed);
        }

        self.id_encoding.store(id_encoding.to_u8(), Ordering::Release);

        Ok(())
    }

    /// Whether document traffic has already read the encoding.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new(IdEncoding::default())
    }
}
