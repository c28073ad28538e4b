//! Object storage for generated plant images.
//!
//! Wraps the AWS S3 SDK behind the [`ImageStore`] trait so the request
//! handler depends on `Arc<dyn ImageStore>` and tests substitute an
//! in-memory double.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

/// Key prefix for all generated plant images.
const KEY_PREFIX: &str = "plantimage/generated";

/// Stores PNG images and returns their public URLs.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` under `filename`, returning the public URL.
    ///
    /// No existence check and no overwrite protection: re-uploading the
    /// same filename silently replaces prior content.
    async fn put_png(&self, filename: &str, bytes: Bytes) -> Result<String, StorageError>;
}

/// Errors from the object storage layer.
///
/// Unlike the provider clients these are hard errors; a storage failure is
/// a fatal request error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The S3 put request failed.
    #[error("S3 upload failed: {0}")]
    Upload(String),
}

/// S3-backed [`ImageStore`].
pub struct S3ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3ImageStore {
    /// Create a store from ambient AWS configuration (environment
    /// credentials, shared config files).
    pub async fn from_env(bucket: String, region: String) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            region,
        }
    }

    /// Object key for a generated image filename.
    fn object_key(filename: &str) -> String {
        format!("{KEY_PREFIX}/{filename}")
    }

    /// Deterministic public URL for an object key, derived from bucket
    /// name, region and key.
    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put_png(&self, filename: &str, bytes: Bytes) -> Result<String, StorageError> {
        let key = Self::object_key(filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type("image/png")
            .send()
            .await
            .map_err(|err| StorageError::Upload(err.to_string()))?;

        let url = self.public_url(&key);
        tracing::debug!(%key, "Uploaded image to S3");
        Ok(url)
    }
}
