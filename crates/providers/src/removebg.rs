//! REST client for the remove.bg background-removal API.

use async_trait::async_trait;
use bytes::Bytes;

use crate::BackgroundRemover;

const DEFAULT_ENDPOINT: &str = "https://api.remove.bg/v1.0/removebg";

/// HTTP client for the remove.bg `removebg` endpoint.
pub struct RemoveBgClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Errors from the remove.bg REST layer.
///
/// Never escapes [`BackgroundRemover::remove_background`]; failures are
/// logged and collapsed into `None` so the caller falls back to the
/// unprocessed image.
#[derive(Debug, thiserror::Error)]
pub enum RemoveBgError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// remove.bg returned a non-200 status code.
    #[error("remove.bg API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl RemoveBgClient {
    /// Create a new client using the production remove.bg endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_string())
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    /// Post the image URL with automatic sizing and return the processed
    /// PNG bytes.
    async fn request_removal(&self, image_url: &str) -> Result<Bytes, RemoveBgError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Api-Key", &self.api_key)
            .form(&[("image_url", image_url), ("size", "auto")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoveBgError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl BackgroundRemover for RemoveBgClient {
    async fn remove_background(&self, image_url: &str) -> Option<Bytes> {
        match self.request_removal(image_url).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!(image_url, error = %err, "Background removal failed");
                None
            }
        }
    }
}
