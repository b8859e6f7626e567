use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;
use crate::pipeline::BlobStore;

/// Blob store on the local filesystem. Objects live at
/// `{root}/{bucket}/{key}`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    bucket_directory: PathBuf,
}

impl FileBlobStore {
    pub fn new<P: AsRef<Path>>(root: P, bucket: &str) -> Self {
        Self {
            bucket_directory: root.as_ref().join(bucket),
        }
    }

    pub fn bucket_directory(&self) -> &Path {
        &self.bucket_directory
    }

    /// Maps a key to its path, rejecting keys that would escape the bucket.
    pub fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.bucket_directory.join(relative))
    }

    /// Writes `content` under `key`. Fails with `AlreadyExists` when the key is
    /// already taken; existing objects are never overwritten.
    pub fn put(&self, key: &str, content: &[u8]) -> Result<PathBuf, StorageError> {
        use std::io::Write;

        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }

        // create_new is O_CREAT | O_EXCL: the existence check and the
        // creation are one atomic step.
        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(path));
            }
            Err(e) => return Err(StorageError::Write { path, source: e }),
        };

        if let Err(e) = file.write_all(content) {
            drop(file);
            // Don't leave a truncated object behind.
            let _ = std::fs::remove_file(&path);
            return Err(StorageError::Write { path, source: e });
        }

        Ok(path)
    }

    /// Removes the object under `key`. Removing a missing object succeeds.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Delete { path, source: e }),
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.resolve(key)
            .map(|path| std::fs::symlink_metadata(path).is_ok())
            .unwrap_or(false)
    }
}

fn ensure_directory(path: &Path) -> Result<(), StorageError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| StorageError::CreateDir {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn upload(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let store = self.clone();
        let owned_key = key.to_string();
        let path = tokio::task::spawn_blocking(move || store.put(&owned_key, &bytes)).await??;
        tracing::debug!(
            path = %path.display(),
            content_type,
            "Stored attachment blob"
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let store = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || store.remove(&key)).await?
    }
}
