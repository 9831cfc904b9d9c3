//! # Stored Objects
//!
//! [`StoredObject`] is the catalog record for one distinct piece of content.
//! [`Location`] names where its bytes live in the blob medium.

use chrono::{DateTime, Utc};
use plagio_core::{DocumentId, FileExtension, Fingerprint, ValidationError};
use serde::{Deserialize, Serialize};

/// Content-addressed blob name: `{fingerprint}{extension}`.
///
/// A bare file name, never a path. Two objects with the same fingerprint
/// would share a location, which is why the catalog forbids that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location(String);

impl Location {
    /// Derive the location for content with this fingerprint and extension.
    pub fn derive(fingerprint: &Fingerprint, extension: &FileExtension) -> Self {
        Self(format!("{fingerprint}{extension}"))
    }

    /// Validate a location read back from the catalog.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let valid = !s.is_empty()
            && !s.starts_with('.')
            && !s.contains("..")
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::InvalidLocation(s.to_string()))
        }
    }

    /// The blob name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Location {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        value.0
    }
}

/// Catalog record of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Identifier minted at store time.
    pub id: DocumentId,
    /// Digest of the exact stored bytes. Unique across the catalog.
    pub fingerprint: Fingerprint,
    /// File name as supplied by the uploader.
    pub display_name: String,
    /// Where the bytes live in the blob medium.
    pub location: Location,
    /// Media type recorded at upload.
    pub media_type: String,
    /// Length of the stored bytes.
    pub byte_size: u64,
    /// When the object was recorded.
    pub created_at: DateTime<Utc>,
}

/// A retrieved document: its bytes plus the metadata needed to serve them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedObject {
    /// The exact stored bytes, verified against the fingerprint.
    pub bytes: Vec<u8>,
    /// File name as supplied by the uploader.
    pub display_name: String,
    /// Media type recorded at upload.
    pub media_type: String,
}
