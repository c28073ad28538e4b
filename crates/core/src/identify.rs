//! Identification result shaping.
//!
//! The PlantNet API reports a 0-1 probability per candidate; users see a
//! 0-100 percentage rounded to one decimal place.

/// A single identified species with its user-facing confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    /// Scientific name without the author suffix, e.g. "Rosa chinensis".
    pub scientific_name: String,
    /// Confidence as a 0-100 percentage, one decimal place.
    pub confidence: f64,
}

/// Scale a 0-1 identification score to a 0-100 percentage rounded to one
/// decimal place.
///
/// # Examples
///
/// ```
/// use verde_core::identify::confidence_percent;
///
/// assert_eq!(confidence_percent(0.87), 87.0);
/// assert_eq!(confidence_percent(0.8767), 87.7);
/// ```
pub fn confidence_percent(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}
