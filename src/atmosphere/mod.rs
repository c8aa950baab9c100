//! Earth atmosphere effects on observed sky positions and brightness
//!
//! - `refraction`: geometric ↔ apparent altitude of alt-az vectors
//! - `extinction`: airmass and the magnitude loss it causes

pub mod extinction;
pub mod refraction;

pub use extinction::{Extinction, UndergroundMode, MAX_UNDERGROUND_AIRMASS};
pub use refraction::Refraction;
