//! Domain logic shared across the verde backend.
//!
//! Pure functions and types only. No I/O lives in this crate.

pub mod identify;
pub mod naming;
pub mod types;
