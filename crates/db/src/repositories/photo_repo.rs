//! Repository for the append-only `uploaded_plant_photos` table.

use verde_core::types::DbId;

use crate::models::uploaded_photo::UploadedPlantPhoto;

/// Append-only access to the photo upload log.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Record that a user uploaded a photo which resolved to `plant_id`.
    ///
    /// Unconditional append; `uploaded_at` defaults to `NOW()`.
    pub async fn insert<'e, E>(executor: E, user_id: DbId, plant_id: DbId) -> Result<DbId, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO uploaded_plant_photos (user_id, plant_id)
             VALUES ($1, $2)
             RETURNING photo_id",
        )
        .bind(user_id)
        .bind(plant_id)
        .fetch_one(executor)
        .await
    }

    /// List upload records for a user, newest first.
    pub async fn list_by_user<'e, E>(
        executor: E,
        user_id: DbId,
    ) -> Result<Vec<UploadedPlantPhoto>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_as::<_, UploadedPlantPhoto>(
            "SELECT photo_id, user_id, plant_id, uploaded_at
             FROM uploaded_plant_photos
             WHERE user_id = $1
             ORDER BY uploaded_at DESC",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }
}
