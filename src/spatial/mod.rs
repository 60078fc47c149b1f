//! Directional gain, distance falloff and panning models.
//!
//! Everything in this module is pure math over poses and positions; the
//! registry in [`crate::world`] composes these into per-source parameters.

mod attenuation;
mod directivity;
mod hearing;
mod pan;
mod params;

pub use attenuation::DistanceModel;
pub use directivity::DirectivityPattern;
pub use hearing::listener_gain;
pub use pan::stereo_pan;
pub use params::{compute_params, AudioParams};
