//! In-memory object store used by tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::object_store::ObjectStore;

/// Base of the fake public URLs handed out by [`MemoryStore`].
pub const MEMORY_BASE_URL: &str = "https://storage.test";

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// [`ObjectStore`] backed by a map. Overwrites like the real thing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under `path`, if any.
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("memory store lock poisoned")
            .get(path)
            .map(|object| object.bytes.clone())
    }

    /// Content type recorded for `path`, if any.
    pub fn content_type(&self, path: &str) -> Option<String> {
        self.objects
            .lock()
            .expect("memory store lock poisoned")
            .get(path)
            .map(|object| object.content_type.clone())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().expect("memory store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects
            .lock()
            .expect("memory store lock poisoned")
            .insert(
                path.to_string(),
                StoredObject {
                    bytes,
                    content_type: content_type.to_string(),
                },
            );
        Ok(format!("{MEMORY_BASE_URL}/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_returns_stable_url_and_overwrites() {
        let store = MemoryStore::new();

        let first = store.put("a/b.png", vec![1, 2], "image/png").await.unwrap();
        assert_eq!(first, "https://storage.test/a/b.png");
        assert_eq!(store.get("a/b.png"), Some(vec![1, 2]));

        let second = store.put("a/b.png", vec![3], "image/png").await.unwrap();
        assert_eq!(second, first, "same path must yield the same URL");
        assert_eq!(store.get("a/b.png"), Some(vec![3]), "latest bytes win");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn records_content_type() {
        let store = MemoryStore::new();
        store.put("n.mp3", vec![0], "audio/mpeg").await.unwrap();
        assert_eq!(store.content_type("n.mp3").as_deref(), Some("audio/mpeg"));
    }
}
