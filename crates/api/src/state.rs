use std::sync::Arc;

use verde_providers::{BackgroundRemover, ImageFetcher, ImageSynthesizer, SpeciesIdentifier, Translator};
use verde_storage::ImageStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Every external
/// collaborator is a trait object constructed once at startup and injected
/// here, so integration tests swap in doubles instead of reaching the
/// network.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: verde_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// PlantNet species identification.
    pub identifier: Arc<dyn SpeciesIdentifier>,
    /// DALL-E reference image synthesis.
    pub synthesizer: Arc<dyn ImageSynthesizer>,
    /// remove.bg background removal.
    pub remover: Arc<dyn BackgroundRemover>,
    /// Korean common-name translation.
    pub translator: Arc<dyn Translator>,
    /// Plain GET used to re-fetch a generated image for upload.
    pub fetcher: Arc<dyn ImageFetcher>,
    /// S3 object storage for generated images.
    pub store: Arc<dyn ImageStore>,
}
