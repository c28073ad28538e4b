//! Repository for the `user_plants` table.

use verde_core::types::DbId;

use crate::models::user_plant::UserPlant;

/// Provides upsert-style access to user-plant relationship rows.
pub struct UserPlantRepo;

impl UserPlantRepo {
    /// Resolve a user-plant id for a (user, plant) pair, inserting the row
    /// on first occurrence.
    ///
    /// Same single-statement upsert shape as [`PlantRepo::get_or_create`]:
    /// the `UNIQUE (user_id, plant_id)` constraint absorbs concurrent
    /// first-inserts and the existing id is returned.
    ///
    /// [`PlantRepo::get_or_create`]: crate::repositories::PlantRepo::get_or_create
    pub async fn get_or_create<'e, E>(
        executor: E,
        user_id: DbId,
        plant_id: DbId,
    ) -> Result<DbId, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO user_plants (user_id, plant_id) VALUES ($1, $2)
             ON CONFLICT (user_id, plant_id)
             DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING user_plant_id",
        )
        .bind(user_id)
        .bind(plant_id)
        .fetch_one(executor)
        .await
    }

    /// List all plants a user has registered, newest first.
    pub async fn list_by_user<'e, E>(executor: E, user_id: DbId) -> Result<Vec<UserPlant>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_as::<_, UserPlant>(
            "SELECT user_plant_id, user_id, plant_id, registered_at
             FROM user_plants
             WHERE user_id = $1
             ORDER BY registered_at DESC",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await
    }
}
