//! # Error Hierarchy
//!
//! Validation errors for the domain newtypes, built with `thiserror`.
//! Each variant carries the offending input and the expected shape so an
//! operator can diagnose a rejected request without reading source.

use thiserror::Error;

/// Validation errors for domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The uploaded payload contained no bytes.
    #[error("content must not be empty")]
    EmptyContent,

    /// The file name has no extension at all.
    #[error("file name \"{0}\" has no extension")]
    MissingExtension(String),

    /// The file extension is not on the configured allow-list.
    #[error("file extension \"{extension}\" is not allowed (allowed: {allowed})")]
    UnsupportedExtension {
        /// The normalized extension that was rejected.
        extension: String,
        /// Comma-separated list of permitted extensions.
        allowed: String,
    },

    /// A fingerprint string is not lowercase hex of a known digest length.
    #[error("invalid fingerprint \"{0}\" (expected 64 or 128 hex characters)")]
    InvalidFingerprint(String),

    /// A document identifier could not be parsed as a UUID.
    #[error("invalid document id \"{0}\" (expected a UUID)")]
    InvalidDocumentId(String),

    /// The fingerprint algorithm name is not recognized.
    #[error("unknown fingerprint algorithm \"{0}\" (expected sha256 or sha512)")]
    UnknownAlgorithm(String),

    /// An extension string is syntactically unusable.
    #[error("invalid extension \"{0}\" (expected e.g. \".txt\")")]
    InvalidExtension(String),

    /// The payload is not UTF-8 text (a leading byte-order mark is allowed).
    #[error("content is not UTF-8 text (invalid byte at offset {offset})")]
    NotText {
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// A stored blob location is not a bare `{fingerprint}{extension}` name.
    #[error("invalid storage location \"{0}\"")]
    InvalidLocation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_lists_allowed_set() {
        let err = ValidationError::UnsupportedExtension {
            extension: ".pdf".into(),
            allowed: ".txt, .md".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains(".pdf"));
        assert!(msg.contains(".txt, .md"));
    }

    #[test]
    fn not_text_reports_offset() {
        let msg = ValidationError::NotText { offset: 3 }.to_string();
        assert!(msg.contains("offset 3"));
    }

    #[test]
    fn missing_extension_names_the_file() {
        let msg = ValidationError::MissingExtension("README".into()).to_string();
        assert!(msg.contains("README"));
    }
}
