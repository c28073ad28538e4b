//! User-plant relationship model.

use serde::Serialize;
use sqlx::FromRow;
use verde_core::types::{DbId, Timestamp};

/// A row from the `user_plants` table, unique per (user_id, plant_id).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPlant {
    pub user_plant_id: DbId,
    pub user_id: DbId,
    pub plant_id: DbId,
    pub registered_at: Timestamp,
}
