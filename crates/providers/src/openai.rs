//! REST client for the OpenAI API: DALL-E 3 image synthesis and
//! gpt-3.5-turbo translation, plus the plain GET used to re-fetch a
//! generated image for upload.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use crate::{FetchError, ImageFetcher, ImageSynthesizer, Translator};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const IMAGE_MODEL: &str = "dall-e-3";
const CHAT_MODEL: &str = "gpt-3.5-turbo";

/// HTTP client for the OpenAI images and chat endpoints.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Errors from the OpenAI REST layer.
///
/// Never escapes the [`ImageSynthesizer`] / [`Translator`] impls; failures
/// are logged and collapsed into `None`.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// OpenAI returned a non-2xx status code.
    #[error("OpenAI API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response parsed but carried no usable payload.
    #[error("OpenAI response contained no {0}")]
    EmptyResponse(&'static str),
}

/// Build the fixed image-synthesis prompt for a species.
///
/// Asks for a photorealistic photo of the plant in a white ceramic pot on
/// a plain white background, with species-specific characteristics.
pub fn synthesis_prompt(species: &str) -> String {
    format!(
        "A high-resolution realistic photograph of a {species} plant in a modern white ceramic pot, \
         centered on a plain white background. The plant should display its distinctive \
         species-specific characteristics such as the correct shape, size, flowers, or fruits \
         depending on the name. Avoid generic green foliage. Use soft natural lighting and \
         shallow depth of field. DSLR quality. No cropping, full view."
    )
}

/// Build the translation prompt for a scientific name.
///
/// Asks (in Korean) for the plant's Korean common name as a single word
/// with no surrounding explanation.
pub fn translation_prompt(scientific_name: &str) -> String {
    format!(
        "'{scientific_name}' 식물의 한국어 이름을 한 단어로만 알려줘. \
         다른 설명 없이 식물 이름 하나만 정확히 말해."
    )
}

impl OpenAiClient {
    /// Create a new client against the production OpenAI endpoint.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Request one square 1024x1024 image for the species prompt and
    /// return its hosted URL.
    async fn generate_image(&self, species: &str) -> Result<String, OpenAiError> {
        let body = serde_json::json!({
            "model": IMAGE_MODEL,
            "prompt": synthesis_prompt(species),
            "size": "1024x1024",
            "n": 1,
        });

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ImagesResponse = Self::parse_response(response).await?;
        parsed
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or(OpenAiError::EmptyResponse("image url"))
    }

    /// Ask the chat model for the Korean common name of a species.
    async fn request_translation(&self, scientific_name: &str) -> Result<String, OpenAiError> {
        let body = serde_json::json!({
            "model": CHAT_MODEL,
            "messages": [{"role": "user", "content": translation_prompt(scientific_name)}],
            "max_tokens": 20,
            "temperature": 0.2,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ChatResponse = Self::parse_response(response).await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(OpenAiError::EmptyResponse("chat completion"))?;
        Ok(content)
    }

    /// Ensure a success status, then parse the JSON body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, OpenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(OpenAiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ImageSynthesizer for OpenAiClient {
    async fn synthesize(&self, species: &str) -> Option<String> {
        match self.generate_image(species).await {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(species, error = %err, "Image synthesis failed");
                None
            }
        }
    }
}

#[async_trait]
impl Translator for OpenAiClient {
    async fn translate(&self, scientific_name: &str) -> Option<String> {
        match self.request_translation(scientific_name).await {
            Ok(name) => Some(name),
            Err(err) => {
                tracing::warn!(scientific_name, error = %err, "Translation failed");
                None
            }
        }
    }
}

#[async_trait]
impl ImageFetcher for OpenAiClient {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes().await?)
    }
}
