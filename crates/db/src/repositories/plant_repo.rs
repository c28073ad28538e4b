//! Repository for the `plants` table.

use verde_core::types::DbId;

use crate::models::plant::Plant;

/// Provides upsert-style access to plant species rows.
pub struct PlantRepo;

impl PlantRepo {
    /// Resolve a plant id by scientific name, inserting the row if the
    /// species has never been seen.
    ///
    /// Runs as a single atomic statement so concurrent first-inserts of the
    /// same species cannot race: the uniqueness constraint on
    /// `scientific_name` makes the losing insert fall into the `ON CONFLICT`
    /// arm and return the existing row's id.
    pub async fn get_or_create<'e, E>(executor: E, scientific_name: &str) -> Result<DbId, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO plants (scientific_name) VALUES ($1)
             ON CONFLICT (scientific_name)
             DO UPDATE SET scientific_name = EXCLUDED.scientific_name
             RETURNING plant_id",
        )
        .bind(scientific_name)
        .fetch_one(executor)
        .await
    }

    /// Find a plant by its internal id.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Plant>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query_as::<_, Plant>(
            "SELECT plant_id, scientific_name FROM plants WHERE plant_id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }
}
