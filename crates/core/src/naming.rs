//! Object storage filename conventions.
//!
//! Generated reference images are stored under deterministic names derived
//! from the identified species, so a later upload for the same species
//! replaces the previous object.

/// Filename for the raw synthesized reference image.
///
/// Convention: `dalle_<scientific name>.png`.
///
/// # Examples
///
/// ```
/// use verde_core::naming::dalle_filename;
///
/// assert_eq!(dalle_filename("Rosa chinensis"), "dalle_Rosa chinensis.png");
/// ```
pub fn dalle_filename(scientific_name: &str) -> String {
    format!("dalle_{scientific_name}.png")
}

/// Filename for the background-removed variant.
///
/// Convention: `removedbg_<scientific name>.png`.
pub fn removed_bg_filename(scientific_name: &str) -> String {
    format!("removedbg_{scientific_name}.png")
}
