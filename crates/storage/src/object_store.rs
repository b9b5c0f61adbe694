//! The object storage seam.

use async_trait::async_trait;

use crate::error::StorageError;

/// Write-once-read-many object storage.
///
/// `put` is idempotent per path: re-uploading overwrites and returns a
/// URL for the latest bytes, never an error.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Verify the store is usable without performing any call.
    fn ensure_configured(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Store `bytes` under `path`, returning the public URL.
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}
