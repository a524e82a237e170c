use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::utils::normalize_path;

use super::{MediaStore, StorageError};

/// Vault backed by a directory on disk.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let normalized = normalize_path(path);
        if normalized == "/" {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(normalized.split('/').fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }
}

#[async_trait]
impl MediaStore for FsStore {
    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let full_path = self.resolve(path)?;
        fs::try_exists(&full_path)
            .await
            .map_err(|e| StorageError::io(full_path.display().to_string(), e))
    }

    async fn write_binary(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent.display().to_string(), e))?;
        }

        let file_name = full_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StorageError::InvalidPath(path.to_string()))?;
        let temp_path = full_path.with_file_name(format!(".{}.{}.part", file_name, uuid::Uuid::new_v4()));

        if let Err(e) = fs::write(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::io(temp_path.display().to_string(), e));
        }

        if let Err(e) = fs::rename(&temp_path, &full_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::io(full_path.display().to_string(), e));
        }

        debug!("Wrote {} bytes to {}", bytes.len(), full_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path());

        store
            .write_binary("Files/Reels/video_abc.mp4", b"video bytes")
            .await
            .unwrap();

        let on_disk = std::fs::read(temp_dir.path().join("Files/Reels/video_abc.mp4")).unwrap();
        assert_eq!(on_disk, b"video bytes");
        assert!(store.exists("Files/Reels/video_abc.mp4").await.unwrap());
        assert!(!store.exists("Files/Reels/video_xyz.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path());

        store.write_binary("thumb.jpg", b"old").await.unwrap();
        store.write_binary("thumb.jpg", b"new").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["thumb.jpg".to_string()]);
        assert_eq!(std::fs::read(temp_dir.path().join("thumb.jpg")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_parent_escape_is_clamped_to_root() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path().join("vault"));

        store.write_binary("../../outside.jpg", b"x").await.unwrap();

        assert!(temp_dir.path().join("vault/outside.jpg").exists());
        assert!(!temp_dir.path().join("outside.jpg").exists());
    }

    #[tokio::test]
    async fn test_root_path_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsStore::new(temp_dir.path());
        assert!(matches!(store.exists("/").await, Err(StorageError::InvalidPath(_))));
    }
}
