//! # plagio-store: Content-Addressed Document Store
//!
//! Stores each distinct document exactly once and hands out a stable
//! [`DocumentId`](plagio_core::DocumentId) for it.
//!
//! ## Layout
//!
//! - Metadata lives in an [`ObjectCatalog`] (Postgres in production, the
//!   in-memory [`MemoryCatalog`] in tests and development). The catalog
//!   enforces fingerprint uniqueness; it is the source of truth for whether
//!   an object exists.
//! - Bytes live in a [`BlobStore`] under a content-addressed [`Location`]
//!   `{fingerprint}{extension}`, independent of the identifier.
//!
//! ## Write Order
//!
//! Bytes first, metadata second. A crash in between leaves at most an
//! unreferenced blob whose name is its own digest: invisible to
//! [`ContentStore::fetch`], and overwritten with identical bytes by the next
//! upload of the same content.

pub mod blob;
pub mod catalog;
pub mod config;
pub mod error;
pub mod object;
pub mod store;

pub use blob::{BlobStore, FsBlobStore};
pub use catalog::{MemoryCatalog, ObjectCatalog};
pub use config::{ContentStoreConfig, ExtensionAllowList};
pub use error::{BlobError, CatalogError, StoreError};
pub use object::{FetchedObject, Location, StoredObject};
pub use store::ContentStore;
