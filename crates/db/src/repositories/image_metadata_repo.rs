//! Repository for the append-only `image_metadata` table.

use sqlx::PgPool;
use verde_core::types::DbId;

use crate::models::image_metadata::{CreateImageMetadata, ImageMetadata};

const COLUMNS: &str =
    "image_metadata_id, user_id, plant_name, confidence, dalle_url, removed_url, created_at";

/// Append-only access to per-request identification metadata.
///
/// Independent of the relational plant tables; runs directly on the pool
/// outside the registration transaction.
pub struct ImageMetadataRepo;

impl ImageMetadataRepo {
    /// Insert a new metadata row, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateImageMetadata,
    ) -> Result<ImageMetadata, sqlx::Error> {
        let query = format!(
            "INSERT INTO image_metadata (user_id, plant_name, confidence, dalle_url, removed_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImageMetadata>(&query)
            .bind(input.user_id)
            .bind(&input.plant_name)
            .bind(input.confidence)
            .bind(&input.dalle_url)
            .bind(&input.removed_url)
            .fetch_one(pool)
            .await
    }

    /// List metadata rows for a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<ImageMetadata>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM image_metadata
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ImageMetadata>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
