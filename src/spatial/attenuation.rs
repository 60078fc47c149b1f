//! Distance falloff curves.

use std::f32::consts::PI;

/// Fraction of the cutoff range after which the edge taper engages.
const TAPER_START: f32 = 0.8;

/// Distance falloff curve selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceModel {
    /// Straight line from full gain at the reference distance to zero at
    /// the cutoff, scaled by rolloff
    Linear,
    /// `ref / (ref + rolloff * (d - ref))`; the free-field 1/d law at
    /// rolloff 1
    #[default]
    Inverse,
    /// `(ref / d)^rolloff`
    Exponential,
}

impl DistanceModel {
    /// Attenuation in [0.0, 1.0] for a source `distance` away.
    ///
    /// Distances inside `ref_distance` clamp to it, so gain never exceeds
    /// 1. At or beyond `max_distance` the source is hard-silent, and the
    /// last 20% of the range blends through a raised-cosine taper so the
    /// curve lands on exactly zero instead of jumping there. A degenerate
    /// range (`max_distance <= ref_distance`) is treated as already past
    /// the cutoff, and a non-positive `ref_distance` is raised to a tiny
    /// epsilon so the curves stay finite.
    pub fn attenuation(
        self,
        distance: f32,
        ref_distance: f32,
        max_distance: f32,
        rolloff: f32,
    ) -> f32 {
        // A zero reference would divide to NaN below.
        let ref_distance = ref_distance.max(f32::EPSILON);
        if max_distance <= ref_distance || distance >= max_distance {
            return 0.0;
        }

        let d = distance.max(ref_distance);
        let base = match self {
            Self::Linear => 1.0 - rolloff * (d - ref_distance) / (max_distance - ref_distance),
            Self::Inverse => ref_distance / (ref_distance + rolloff * (d - ref_distance)),
            Self::Exponential => (ref_distance / d).powf(rolloff),
        };

        let taper_from = TAPER_START * max_distance;
        let taper = if distance > taper_from {
            let t = (distance - taper_from) / (max_distance - taper_from);
            0.5 * (1.0 + (PI * t).cos())
        } else {
            1.0
        };

        (base * taper).clamp(0.0, 1.0)
    }
}
