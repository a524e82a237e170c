use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::utils::normalize_path;

use super::{MediaStore, StorageError};

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    files: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.get(&normalize_path(path)).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.files.contains_key(&normalize_path(path)))
    }

    async fn write_binary(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let key = normalize_path(path);
        if key == "/" {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        self.files.insert(key, bytes.to_vec());
        Ok(())
    }
}
