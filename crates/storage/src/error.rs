use thiserror::Error;

/// Errors from the asset storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A required bucket or credential setting is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// Fetching the generated asset from its upstream URL failed.
    #[error("download failed: {0}")]
    Download(String),

    /// Writing the asset to the object store failed.
    #[error("upload failed: {0}")]
    Upload(String),

    /// An explicit deadline expired.
    #[error("timed out: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for StorageError {
    /// Downloads are the only reqwest use in this crate, so transport
    /// errors map to [`StorageError::Download`] unless they timed out.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Download(err.to_string())
        }
    }
}
