use thiserror::Error;

/// Errors from the generation service clients.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// A required credential or setting is missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP request failed in transit (network, DNS, TLS, etc.).
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("api error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// An explicit deadline expired.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The service answered 2xx with an unusable payload.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GenAiError {
    /// Transport timeouts become [`GenAiError::Timeout`] so callers can
    /// tell a slow upstream from a broken one.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}
