//! Transactional registration of an identification result.

use sqlx::PgPool;
use verde_core::types::DbId;

use crate::repositories::{PhotoRepo, PlantRepo, UserPlantRepo};

/// Ids resolved while registering an identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantRegistration {
    pub plant_id: DbId,
    pub user_plant_id: DbId,
    pub photo_id: DbId,
}

/// Wraps the Plant -> UserPlant -> UploadedPlantPhoto write sequence in a
/// single transaction.
pub struct PlantRegistry;

impl PlantRegistry {
    /// Resolve (creating if absent) the plant and user-plant rows for an
    /// identification and append an upload log entry, atomically.
    ///
    /// Either all three writes become visible or none do; a failure at any
    /// step rolls the transaction back.
    pub async fn register(
        pool: &PgPool,
        user_id: DbId,
        scientific_name: &str,
    ) -> Result<PlantRegistration, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let plant_id = PlantRepo::get_or_create(&mut *tx, scientific_name).await?;
        let user_plant_id = UserPlantRepo::get_or_create(&mut *tx, user_id, plant_id).await?;
        let photo_id = PhotoRepo::insert(&mut *tx, user_id, plant_id).await?;

        tx.commit().await?;
        tracing::debug!(plant_id, user_plant_id, photo_id, "Registered plant identification");

        Ok(PlantRegistration {
            plant_id,
            user_plant_id,
            photo_id,
        })
    }
}
