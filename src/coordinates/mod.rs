//! Angle and vector coordinate helpers

pub mod angle;
pub mod spherical;

pub use angle::Angle;
pub use spherical::{angle_between, Spherical};
