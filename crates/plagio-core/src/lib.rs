#![deny(missing_docs)]

//! # plagio-core: Foundational Types for Plagio
//!
//! This crate defines the types shared by the content store, the analysis
//! cache, the HTTP services and the CLI. It has no internal crate
//! dependencies: only `serde`, `thiserror`, `uuid`, `sha2` and `subtle`.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** A [`DocumentId`] is not a bare
//!    `Uuid`, and a [`Fingerprint`] is not a bare `String`. The dedup key and
//!    the identifier can never be confused.
//!
//! 2. **Fingerprints are minted from bytes, and only parsed otherwise.**
//!    [`Fingerprint::compute`] digests the exact uploaded bytes. The other
//!    public constructors, [`Fingerprint::from_hex`] and deserialization,
//!    only parse hex of a known digest length (normalized to lowercase) and
//!    are meant for values read back from storage.
//!
//! 3. **Extensions are normalized once.** [`FileExtension`] lowercases and
//!    keeps the leading dot, so allow-list checks and content-addressed
//!    locations agree on spelling.

pub mod error;
pub mod extension;
pub mod fingerprint;
pub mod identity;

pub use error::ValidationError;
pub use extension::FileExtension;
pub use fingerprint::{Fingerprint, FingerprintAlgorithm};
pub use identity::DocumentId;

/// Media type recorded when the uploader does not supply one.
pub const DEFAULT_MEDIA_TYPE: &str = "text/plain";
