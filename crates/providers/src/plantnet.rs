//! REST client for the PlantNet identification API.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use verde_core::identify::{confidence_percent, Identification};

use crate::SpeciesIdentifier;

const DEFAULT_ENDPOINT: &str = "https://my-api.plantnet.org/v2/identify/all";

/// HTTP client for the PlantNet `identify` endpoint.
pub struct PlantNetClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// Top-level PlantNet response body.
#[derive(Debug, Deserialize)]
struct IdentifyResponse {
    #[serde(default)]
    results: Vec<IdentifyResult>,
}

/// One ranked candidate in a PlantNet response.
#[derive(Debug, Deserialize)]
struct IdentifyResult {
    species: Species,
    /// 0-1 probability.
    score: f64,
}

#[derive(Debug, Deserialize)]
struct Species {
    #[serde(rename = "scientificNameWithoutAuthor")]
    scientific_name_without_author: String,
}

/// Errors from the PlantNet REST layer.
///
/// Never escapes [`SpeciesIdentifier::identify`]; failures are logged and
/// collapsed into the "unknown plant" outcome.
#[derive(Debug, thiserror::Error)]
pub enum PlantNetError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// PlantNet returned a non-2xx status code.
    #[error("PlantNet API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl PlantNetClient {
    /// Create a new client using the production PlantNet endpoint.
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

    /// Send the identification request and parse the ranked result list.
    ///
    /// Sends a single multipart request with the image under the `images`
    /// field (filename `plant.jpg`, MIME `image/jpeg`) and a fixed `lang=en`
    /// parameter.
    async fn request_identification(&self, image: Bytes) -> Result<IdentifyResponse, PlantNetError> {
        let part = reqwest::multipart::Part::bytes(image.to_vec())
            .file_name("plant.jpg")
            .mime_str("image/jpeg")?;
        let form = reqwest::multipart::Form::new().part("images", part);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("api-key", self.api_key.as_str()), ("lang", "en")])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PlantNetError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<IdentifyResponse>().await?)
    }
}

/// Extract the top-ranked candidate from a parsed response.
fn top_identification(response: IdentifyResponse) -> Option<Identification> {
    let top = response.results.into_iter().next()?;
    Some(Identification {
        scientific_name: top.species.scientific_name_without_author,
        confidence: confidence_percent(top.score),
    })
}

#[async_trait]
impl SpeciesIdentifier for PlantNetClient {
    async fn identify(&self, image: Bytes) -> Option<Identification> {
        match self.request_identification(image).await {
            Ok(response) => {
                let identification = top_identification(response);
                if identification.is_none() {
                    tracing::info!("PlantNet returned no candidates");
                }
                identification
            }
            Err(err) => {
                tracing::warn!(error = %err, "Plant identification failed, treating as unknown");
                None
            }
        }
    }
}
