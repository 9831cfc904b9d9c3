//! Content store configuration.

use std::path::PathBuf;
use std::time::Duration;

use plagio_core::{FileExtension, FingerprintAlgorithm, ValidationError};

/// Default storage root, matching the container volume mount.
pub const DEFAULT_STORAGE_ROOT: &str = "/app/files";

/// Default bound on a single catalog or blob operation.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);

/// The set of accepted upload extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionAllowList(Vec<FileExtension>);

impl ExtensionAllowList {
    /// Build an allow-list, dropping duplicates while keeping order.
    pub fn new(extensions: impl IntoIterator<Item = FileExtension>) -> Self {
        let mut list: Vec<FileExtension> = Vec::new();
        for ext in extensions {
            if !list.contains(&ext) {
                list.push(ext);
            }
        }
        Self(list)
    }

    /// Parse a comma-separated list such as `".txt, md"`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let extensions = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(FileExtension::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if extensions.is_empty() {
            return Err(ValidationError::InvalidExtension(s.to_string()));
        }
        Ok(Self::new(extensions))
    }

    /// Whether `ext` is accepted.
    pub fn contains(&self, ext: &FileExtension) -> bool {
        self.0.contains(ext)
    }

    /// Reject `ext` unless it is on the list.
    pub fn check(&self, ext: &FileExtension) -> Result<(), ValidationError> {
        if self.contains(ext) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedExtension {
                extension: ext.to_string(),
                allowed: self.to_string(),
            })
        }
    }

    /// Iterate over the accepted extensions.
    pub fn iter(&self) -> impl Iterator<Item = &FileExtension> {
        self.0.iter()
    }
}

impl Default for ExtensionAllowList {
    fn default() -> Self {
        Self(FileExtension::parse(".txt").into_iter().collect())
    }
}

impl std::fmt::Display for ExtensionAllowList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(FileExtension::as_str).collect();
        f.write_str(&joined.join(", "))
    }
}

/// Deployment-level settings for a [`ContentStore`](crate::ContentStore).
#[derive(Debug, Clone)]
pub struct ContentStoreConfig {
    /// Digest used to fingerprint uploads.
    pub fingerprint_algorithm: FingerprintAlgorithm,
    /// Accepted upload extensions.
    pub extension_allow_list: ExtensionAllowList,
    /// Directory holding content-addressed blobs.
    pub storage_root: PathBuf,
    /// Upper bound on each catalog or blob operation.
    pub io_timeout: Duration,
}

impl Default for ContentStoreConfig {
    fn default() -> Self {
        Self {
            fingerprint_algorithm: FingerprintAlgorithm::default(),
            extension_allow_list: ExtensionAllowList::default(),
            storage_root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }
}
