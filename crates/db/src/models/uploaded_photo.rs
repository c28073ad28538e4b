//! Uploaded photo log model.

use serde::Serialize;
use sqlx::FromRow;
use verde_core::types::{DbId, Timestamp};

/// A row from the append-only `uploaded_plant_photos` table.
///
/// Records that a user uploaded a photo which resolved to a plant. Never
/// updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UploadedPlantPhoto {
    pub photo_id: DbId,
    pub user_id: DbId,
    pub plant_id: DbId,
    pub uploaded_at: Timestamp,
}
