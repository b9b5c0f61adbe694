//! S3-compatible object store.
//!
//! Works against AWS S3 proper or any path-style compatible endpoint
//! (MinIO, Cloudflare R2, Supabase storage gateways) via
//! `S3_ENDPOINT`.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::StorageError;
use crate::object_store::ObjectStore;

/// Overall deadline for one storage operation, retries included.
const OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the S3 store.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Target bucket. Uploads fail with a configuration error when missing.
    pub bucket: Option<String>,
    pub region: String,
    /// Custom endpoint for S3-compatible services; unset means AWS.
    pub endpoint: Option<String>,
    /// Static credentials; unset falls back to the SDK's default chain.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Base for returned public URLs. Defaults to the endpoint (path
    /// style) or the bucket's virtual-hosted AWS URL.
    pub public_base_url: Option<String>,
}

impl S3Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default               |
    /// |------------------------|-----------------------|
    /// | `S3_BUCKET`            | unset (uploads fail)  |
    /// | `S3_REGION`            | `us-east-1`           |
    /// | `S3_ENDPOINT`          | unset (AWS)           |
    /// | `S3_ACCESS_KEY_ID`     | unset (default chain) |
    /// | `S3_SECRET_ACCESS_KEY` | unset (default chain) |
    /// | `S3_PUBLIC_URL`        | unset (derived)       |
    pub fn from_env() -> Self {
        Self {
            bucket: std::env::var("S3_BUCKET").ok(),
            region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
            endpoint: std::env::var("S3_ENDPOINT").ok(),
            access_key_id: std::env::var("S3_ACCESS_KEY_ID").ok(),
            secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY").ok(),
            public_base_url: std::env::var("S3_PUBLIC_URL").ok(),
        }
    }
}

/// Public URL for an object at `path`.
///
/// Prefers the configured public base, then the custom endpoint (both
/// path style), then the bucket's virtual-hosted AWS URL.
fn public_object_url(config: &S3Config, bucket: &str, path: &str) -> String {
    if let Some(base) = &config.public_base_url {
        return format!("{}/{}/{}", base.trim_end_matches('/'), bucket, path);
    }
    if let Some(endpoint) = &config.endpoint {
        return format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, path);
    }
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, config.region, path)
}

/// S3-backed [`ObjectStore`].
pub struct S3Store {
    client: aws_sdk_s3::Client,
    config: S3Config,
}

impl S3Store {
    /// Build the SDK client from the configuration.
    ///
    /// Custom endpoints get path-style addressing, which is what the
    /// S3-compatible services expect.
    pub async fn connect(config: S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(OPERATION_TIMEOUT)
                    .build(),
            );

        if let (Some(key), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key.clone(),
                secret.clone(),
                None,
                None,
                "fablehouse-static",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            config,
        }
    }

    fn bucket(&self) -> Result<&str, StorageError> {
        self.config
            .bucket
            .as_deref()
            .ok_or_else(|| StorageError::Config("S3_BUCKET is not configured".into()))
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn ensure_configured(&self) -> Result<(), StorageError> {
        self.bucket().map(|_| ())
    }

    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let bucket = self.bucket()?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| StorageError::Upload(format!("{}", DisplayErrorContext(&err))))?;

        Ok(public_object_url(&self.config, bucket, path))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
