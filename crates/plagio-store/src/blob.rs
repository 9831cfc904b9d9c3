//! # Blob Medium
//!
//! Raw document bytes addressed by [`Location`]. Writes are atomic: bytes go
//! to a uniquely named temporary file in the same directory, are synced, and
//! are then renamed into place. A concurrent reader sees either no file or
//! the complete file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::BlobError;
use crate::object::Location;

/// Byte storage addressed by content-derived location.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` at `location`, replacing any existing blob.
    async fn put(&self, location: &Location, bytes: &[u8]) -> Result<(), BlobError>;

    /// Read the blob at `location`, or `None` if absent.
    async fn get(&self, location: &Location) -> Result<Option<Vec<u8>>, BlobError>;

    /// Verify the medium is usable.
    async fn ping(&self) -> Result<(), BlobError> {
        Ok(())
    }
}

/// Filesystem blob store rooted at one directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Blob store writing under `root`. The directory is created on demand.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, location: &Location) -> PathBuf {
        self.root.join(location.as_str())
    }

    fn temp_path_for(&self, location: &Location) -> PathBuf {
        self.root
            .join(format!(".{}.{}.tmp", location.as_str(), Uuid::new_v4().simple()))
    }
}

/// Temporary file removed on drop unless [`keep`](TempFile::keep) is called.
///
/// Covers both error returns and a caller dropping the write future
/// mid-flight, e.g. on timeout.
struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// The file was renamed away; nothing to clean up.
    fn keep(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = std::fs::remove_file(&self.path) {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "failed to remove temp blob");
                }
            }
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, location: &Location, bytes: &[u8]) -> Result<(), BlobError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let final_path = self.path_for(location);
        let temp = TempFile::new(self.temp_path_for(location));

        let mut file = tokio::fs::File::create(temp.path()).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(temp.path(), &final_path).await?;
        temp.keep();
        Ok(())
    }

    async fn get(&self, location: &Location) -> Result<Option<Vec<u8>>, BlobError> {
        match tokio::fs::read(self.path_for(location)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> Result<(), BlobError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let meta = tokio::fs::metadata(&self.root).await?;
        if meta.permissions().readonly() {
            return Err(BlobError::Io(std::io::Error::new(
                ErrorKind::PermissionDenied,
                format!("storage root {} is read-only", self.root.display()),
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plagio_core::{FileExtension, Fingerprint, FingerprintAlgorithm};

    fn location_for(content: &[u8]) -> Location {
        let fp = Fingerprint::compute(FingerprintAlgorithm::Sha256, content);
        Location::derive(&fp, &FileExtension::parse("txt").unwrap())
    }

    #[tokio::test]
    async fn put_then_get_returns_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FsBlobStore::new(dir.path());
        let loc = location_for(b"payload\r\n");

        blobs.put(&loc, b"payload\r\n").await.unwrap();
        assert_eq!(blobs.get(&loc).await.unwrap().as_deref(), Some(&b"payload\r\n"[..]));
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FsBlobStore::new(dir.path());
        assert_eq!(blobs.get(&location_for(b"absent")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_creates_root_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("files");
        let blobs = FsBlobStore::new(&root);
        let loc = location_for(b"x");

        blobs.put(&loc, b"x").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(&root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![loc.as_str().to_string()]);
    }

    #[tokio::test]
    async fn put_overwrites_existing_blob() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FsBlobStore::new(dir.path());
        let loc = location_for(b"v");
        std::fs::write(dir.path().join(loc.as_str()), b"partial").unwrap();

        blobs.put(&loc, b"v").await.unwrap();
        assert_eq!(blobs.get(&loc).await.unwrap().as_deref(), Some(&b"v"[..]));
    }

    #[test]
    fn temp_file_is_removed_when_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".x.tmp");
        std::fs::write(&path, b"half written").unwrap();

        drop(TempFile::new(path.clone()));
        assert!(!path.exists());
    }

    #[test]
    fn kept_temp_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".y.tmp");
        std::fs::write(&path, b"renamed elsewhere").unwrap();

        TempFile::new(path.clone()).keep();
        assert!(path.exists());
    }

    #[test]
    fn dropping_guard_for_missing_file_is_quiet() {
        let dir = tempfile::tempdir().unwrap();
        drop(TempFile::new(dir.path().join(".never-created.tmp")));
    }

    #[tokio::test]
    async fn write_cancelled_by_timeout_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".stalled.tmp");

        let temp_path = path.clone();
        let stalled = async move {
            let temp = TempFile::new(temp_path);
            tokio::fs::write(temp.path(), b"partial").await.unwrap();
            std::future::pending::<()>().await;
            temp.keep();
        };

        let result =
            tokio::time::timeout(std::time::Duration::from_millis(50), stalled).await;
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FsBlobStore::new(dir.path());
        let loc = location_for(b"blocked");
        // A non-empty directory at the target path makes the rename fail.
        let target = dir.path().join(loc.as_str());
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("occupant"), b"x").unwrap();

        assert!(blobs.put(&loc, b"blocked").await.is_err());

        let leftovers: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }

    #[tokio::test]
    async fn ping_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("fresh");
        FsBlobStore::new(&root).ping().await.unwrap();
        assert!(root.is_dir());
    }
}
