//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus a create DTO where the insert takes more than a
//! couple of scalars.

pub mod image_metadata;
pub mod plant;
pub mod uploaded_photo;
pub mod user_plant;
