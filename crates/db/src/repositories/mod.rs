//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Methods
//! that participate in the registration transaction accept any
//! `PgExecutor` so they run both on the pool and inside a transaction.

pub mod image_metadata_repo;
pub mod photo_repo;
pub mod plant_registry;
pub mod plant_repo;
pub mod user_plant_repo;

pub use image_metadata_repo::ImageMetadataRepo;
pub use photo_repo::PhotoRepo;
pub use plant_registry::{PlantRegistration, PlantRegistry};
pub use plant_repo::PlantRepo;
pub use user_plant_repo::UserPlantRepo;
