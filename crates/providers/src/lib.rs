//! Clients for the third-party HTTP APIs the identification pipeline
//! delegates to: PlantNet (species identification), OpenAI (image synthesis
//! and translation) and remove.bg (background removal).
//!
//! Each collaborator is exposed behind an async trait so the request
//! handler depends on `Arc<dyn Trait>` and tests substitute doubles
//! instead of reaching the network.

use async_trait::async_trait;
use bytes::Bytes;
use verde_core::identify::Identification;

pub mod openai;
pub mod plantnet;
pub mod removebg;

pub use openai::OpenAiClient;
pub use plantnet::PlantNetClient;
pub use removebg::RemoveBgClient;

/// Identifies a plant species from raw photo bytes.
///
/// `None` means "unknown plant": transport errors, non-2xx responses and
/// empty candidate lists all collapse into it. Callers must treat `None`
/// as a valid outcome requiring a fallback response, not a failure.
#[async_trait]
pub trait SpeciesIdentifier: Send + Sync {
    async fn identify(&self, image: Bytes) -> Option<Identification>;
}

/// Generates a synthetic reference photo for a species.
///
/// Returns the hosted URL of the generated image, or `None` on any
/// failure. Non-deterministic and non-idempotent: repeated calls for the
/// same species produce different images.
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    async fn synthesize(&self, species: &str) -> Option<String>;
}

/// Removes the background from an image addressed by URL.
///
/// Returns the processed PNG bytes, or `None` on any non-200 status or
/// transport error. Callers fall back to the unprocessed image.
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    async fn remove_background(&self, image_url: &str) -> Option<Bytes>;
}

/// Translates a scientific plant name into its Korean common name.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, scientific_name: &str) -> Option<String>;
}

/// Fetches raw image bytes from a URL.
///
/// Unlike the other collaborators this surfaces hard errors: by the time
/// the pipeline re-fetches a synthesized image, its URL is known good, so
/// a failure here is a fatal request error.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// Errors from fetching an image over plain GET.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Image fetch failed ({status}) for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The URL that was fetched.
        url: String,
    },
}
