//! # File Extensions
//!
//! [`FileExtension`] is the normalized suffix of a client-supplied file name:
//! lowercase, with its leading dot (`".txt"`). It is used both for the
//! allow-list check at upload time and as the suffix of the content-addressed
//! location, so both always agree on spelling.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MAX_EXTENSION_LEN: usize = 16;

/// Normalized file extension, e.g. `".txt"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileExtension(String);

impl FileExtension {
    /// Parse an extension written with or without its leading dot.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if bare.is_empty()
            || bare.len() > MAX_EXTENSION_LEN
            || !bare.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ValidationError::InvalidExtension(s.to_string()));
        }
        Ok(Self(format!(".{}", bare.to_ascii_lowercase())))
    }

    /// Extract and normalize the extension of a client-supplied file name.
    ///
    /// Only the final path component is considered, with either separator,
    /// since browsers on some platforms send the full client-side path.
    pub fn from_file_name(name: &str) -> Result<Self, ValidationError> {
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        match base.rfind('.') {
            Some(idx) if idx + 1 < base.len() => Self::parse(&base[idx..])
                .map_err(|_| ValidationError::MissingExtension(name.to_string())),
            _ => Err(ValidationError::MissingExtension(name.to_string())),
        }
    }

    /// The extension including its leading dot.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FileExtension {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FileExtension {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FileExtension> for String {
    fn from(value: FileExtension) -> Self {
        value.0
    }
}
