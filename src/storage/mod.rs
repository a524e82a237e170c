mod error;
mod fs;
mod memory;

pub use error::StorageError;
pub use fs::FsStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

/// Binary storage addressed by normalized, vault-relative paths.
///
/// Writes replace the whole file; a reader never observes a partially
/// written asset.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;
    async fn write_binary(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError>;
}
