//! Image metadata entity model and create DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verde_core::types::{DbId, Timestamp};

/// A row from the append-only `image_metadata` table.
///
/// One row per successful identification request, recording the reported
/// confidence and where the generated images ended up in object storage.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageMetadata {
    pub image_metadata_id: DbId,
    pub user_id: DbId,
    pub plant_name: String,
    pub confidence: Option<f32>,
    pub dalle_url: Option<String>,
    pub removed_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new image metadata row.
///
/// The URL fields are `None` when the corresponding pipeline step failed
/// (image synthesis or background removal).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImageMetadata {
    pub user_id: DbId,
    pub plant_name: String,
    pub confidence: Option<f32>,
    pub dalle_url: Option<String>,
    pub removed_url: Option<String>,
}
