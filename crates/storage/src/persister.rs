//! Download-then-store persistence for generated assets.

use std::sync::Arc;
use std::time::Duration;

use fablehouse_core::types::DbId;

use crate::error::StorageError;
use crate::object_store::ObjectStore;

/// Timeout for fetching a generated asset from its upstream URL.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Copies generated assets from their short-lived upstream URLs into
/// the object store, under one key layout per story:
/// `stories/{id}/page-{n}.png` and `stories/{id}/narration.mp3`.
pub struct AssetPersister {
    store: Arc<dyn ObjectStore>,
    downloader: reqwest::Client,
}

impl AssetPersister {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        let downloader = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { store, downloader }
    }

    /// Storage key for a page illustration.
    pub fn image_key(story_id: DbId, page_number: i32) -> String {
        format!("stories/{story_id}/page-{page_number}.png")
    }

    /// Storage key for the narration audio.
    pub fn narration_key(story_id: DbId) -> String {
        format!("stories/{story_id}/narration.mp3")
    }

    /// Verify the underlying store is usable.
    pub fn ensure_configured(&self) -> Result<(), StorageError> {
        self.store.ensure_configured()
    }

    /// Download a page illustration and store it, returning the public URL.
    pub async fn persist_image_from_url(
        &self,
        story_id: DbId,
        page_number: i32,
        url: &str,
    ) -> Result<String, StorageError> {
        let response = self.downloader.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Download(format!(
                "image fetch returned {status} for {url}"
            )));
        }
        let bytes = response.bytes().await?;

        self.store
            .put(&Self::image_key(story_id, page_number), bytes.to_vec(), "image/png")
            .await
    }

    /// Store the narration audio, returning the public URL.
    pub async fn persist_narration(
        &self,
        story_id: DbId,
        audio: Vec<u8>,
    ) -> Result<String, StorageError> {
        self.store
            .put(&Self::narration_key(story_id), audio, "audio/mpeg")
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
