//! # Content Fingerprints
//!
//! A [`Fingerprint`] is the deduplication key of the content store: a
//! collision-resistant digest of the exact uploaded bytes, rendered as
//! lowercase hex. Two uploads with equal fingerprints are treated as the same
//! logical object.
//!
//! The algorithm is a deployment-level choice ([`FingerprintAlgorithm`]).
//! It is recoverable from the fingerprint itself via the hex length, so
//! [`Fingerprint::matches`] can re-verify stored bytes without extra state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;

use crate::error::ValidationError;

/// The digest used to fingerprint content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintAlgorithm {
    /// SHA-256, 64 hex characters.
    #[default]
    Sha256,
    /// SHA-512, 128 hex characters.
    Sha512,
}

impl FingerprintAlgorithm {
    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Length of the hex rendering of a digest produced by this algorithm.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }

    fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            64 => Some(Self::Sha256),
            128 => Some(Self::Sha512),
            _ => None,
        }
    }

    fn digest(&self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(bytes).to_vec(),
            Self::Sha512 => Sha512::digest(bytes).to_vec(),
        }
    }
}

impl std::fmt::Display for FingerprintAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FingerprintAlgorithm {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ValidationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Lowercase-hex digest of a document's exact bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint `bytes` with `algorithm`.
    pub fn compute(algorithm: FingerprintAlgorithm, bytes: &[u8]) -> Self {
        let hex = algorithm
            .digest(bytes)
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Self(hex)
    }

    /// Parse a previously rendered fingerprint.
    ///
    /// Accepts upper- or lowercase hex of a known digest length and
    /// normalizes to lowercase.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        let hex = s.trim().to_ascii_lowercase();
        if FingerprintAlgorithm::from_hex_len(hex.len()).is_none()
            || !hex.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ValidationError::InvalidFingerprint(s.to_string()));
        }
        Ok(Self(hex))
    }

    /// The hex rendering.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The algorithm that produced this fingerprint.
    pub fn algorithm(&self) -> FingerprintAlgorithm {
        // Length is validated at construction.
        FingerprintAlgorithm::from_hex_len(self.0.len()).unwrap_or_default()
    }

    /// Whether `bytes` hash to this fingerprint.
    ///
    /// The comparison runs in constant time over the hex rendering.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        let recomputed = Self::compute(self.algorithm(), bytes);
        bool::from(recomputed.0.as_bytes().ct_eq(self.0.as_bytes()))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.0
    }
}
