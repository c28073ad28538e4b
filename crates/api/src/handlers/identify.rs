//! Handler for the identification pipeline (the request orchestrator).
//!
//! Route:
//! - `POST /identify` -- identify an uploaded plant photo, synthesize a
//!   reference image, remove its background, upload both to storage and
//!   persist the identification.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use verde_core::identify::Identification;
use verde_core::naming::{dalle_filename, removed_bg_filename};
use verde_core::types::DbId;
use verde_db::models::image_metadata::CreateImageMetadata;
use verde_db::repositories::{ImageMetadataRepo, PlantRegistry};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const UNKNOWN_NAME_EN: &str = "Unknown";
const UNKNOWN_NAME_KR: &str = "알 수 없음";

/// Response body for `POST /identify`.
#[derive(Debug, Serialize)]
pub struct IdentifyResponse {
    /// Scientific name, or `"Unknown"` when identification found nothing.
    pub plant_name_en: String,
    /// Korean common name, `"알 수 없음"` when unknown or untranslatable.
    pub plant_name_kr: String,
    /// Confidence as a 0-100 percentage, one decimal place.
    pub confidence: Option<f64>,
    /// Storage URL of the synthesized reference image.
    pub image_url: Option<String>,
    /// Storage URL of the background-removed variant.
    pub removed_bg_image_url: Option<String>,
}

impl IdentifyResponse {
    /// The fixed response for an unidentifiable photo.
    fn unknown() -> Self {
        Self {
            plant_name_en: UNKNOWN_NAME_EN.to_string(),
            plant_name_kr: UNKNOWN_NAME_KR.to_string(),
            confidence: None,
            image_url: None,
            removed_bg_image_url: None,
        }
    }
}

/// Parsed `POST /identify` multipart form.
struct IdentifyUpload {
    image: Bytes,
    user_id: DbId,
}

/// Storage URLs produced by the synthesis half of the pipeline.
#[derive(Default)]
struct StoredImages {
    image_url: Option<String>,
    removed_bg_image_url: Option<String>,
}

/// POST /identify
///
/// Pipeline, strictly sequential:
///
/// 1. Read the uploaded image and `user_id` from the multipart form.
/// 2. Identify the species; an empty result short-circuits to the
///    "unknown" response with no database writes.
/// 3. Synthesize a reference image, remove its background, and upload
///    both variants to object storage. A failed synthesis skips the rest
///    of this half; a failed removal degrades to the original image only.
/// 4. Persist the image metadata row.
/// 5. Register the plant, user-plant and upload-log rows in one
///    transaction.
/// 6. Translate the scientific name for the localized response field.
pub async fn identify(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<IdentifyResponse>> {
    let upload = read_upload(multipart).await?;

    let Some(identification) = state.identifier.identify(upload.image).await else {
        return Ok(Json(IdentifyResponse::unknown()));
    };
    tracing::info!(
        species = %identification.scientific_name,
        confidence = identification.confidence,
        user_id = upload.user_id,
        "Identified plant"
    );

    let images = synthesize_and_store(&state, &identification.scientific_name).await?;

    ImageMetadataRepo::insert(
        &state.pool,
        &CreateImageMetadata {
            user_id: upload.user_id,
            plant_name: identification.scientific_name.clone(),
            confidence: Some(identification.confidence as f32),
            dalle_url: images.image_url.clone(),
            removed_url: images.removed_bg_image_url.clone(),
        },
    )
    .await?;

    PlantRegistry::register(&state.pool, upload.user_id, &identification.scientific_name).await?;

    let plant_name_kr = state
        .translator
        .translate(&identification.scientific_name)
        .await
        .unwrap_or_else(|| UNKNOWN_NAME_KR.to_string());

    let Identification {
        scientific_name,
        confidence,
    } = identification;

    Ok(Json(IdentifyResponse {
        plant_name_en: scientific_name,
        plant_name_kr,
        confidence: Some(confidence),
        image_url: images.image_url,
        removed_bg_image_url: images.removed_bg_image_url,
    }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Extract the `file` bytes and `user_id` from the multipart form.
///
/// Both fields are required; anything missing or unparseable yields a 422.
async fn read_upload(mut multipart: Multipart) -> AppResult<IdentifyUpload> {
    let mut image: Option<Bytes> = None;
    let mut user_id: Option<DbId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Unprocessable(format!("Malformed multipart form: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Unprocessable(format!("Failed to read file: {e}")))?;
                image = Some(bytes);
            }
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Unprocessable(format!("Failed to read user_id: {e}")))?;
                let parsed = text.trim().parse::<DbId>().map_err(|_| {
                    AppError::Unprocessable(format!("user_id must be an integer, got '{text}'"))
                })?;
                user_id = Some(parsed);
            }
            _ => {}
        }
    }

    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Unprocessable("Missing required field 'file'".to_string()))?;
    let user_id = user_id
        .ok_or_else(|| AppError::Unprocessable("Missing required field 'user_id'".to_string()))?;

    Ok(IdentifyUpload { image, user_id })
}

/// Run the synthesis half of the pipeline for an identified species.
///
/// Each step that can fail produces an explicit optional result and every
/// consumer branches on it: a failed synthesis skips background removal,
/// re-fetch and upload entirely; a failed removal still uploads the
/// original image.
async fn synthesize_and_store(state: &AppState, species: &str) -> AppResult<StoredImages> {
    let Some(generated_url) = state.synthesizer.synthesize(species).await else {
        return Ok(StoredImages::default());
    };

    let removed_bytes = state.remover.remove_background(&generated_url).await;

    // The generation API only hands back a hosted URL, so the original
    // bytes need a second round trip before they can be re-uploaded.
    let original_bytes = state.fetcher.fetch_image(&generated_url).await?;

    let image_url = state
        .store
        .put_png(&dalle_filename(species), original_bytes)
        .await?;

    let removed_bg_image_url = match removed_bytes {
        Some(bytes) => Some(
            state
                .store
                .put_png(&removed_bg_filename(species), bytes)
                .await?,
        ),
        None => None,
    };

    Ok(StoredImages {
        image_url: Some(image_url),
        removed_bg_image_url,
    })
}
