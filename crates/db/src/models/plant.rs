//! Plant entity model.

use serde::Serialize;
use sqlx::FromRow;
use verde_core::types::DbId;

/// A plant species row from the `plants` table.
///
/// `scientific_name` is unique; the row is created on first identification
/// of the species and reused thereafter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plant {
    pub plant_id: DbId,
    pub scientific_name: String,
}
