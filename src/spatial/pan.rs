//! Listener-relative stereo panning.

use crate::math::{angle_to, distance, normalize_angle, Pose2, Vec2};

/// Extra lateral push so sources well off-axis reach a full pan.
const LATERAL_SCALE: f32 = 1.5;

/// Stereo pan position in [-1.0, 1.0] for a source at `source_pos`.
///
/// Pure lateral placement: the sine of the listener-relative azimuth
/// (positive = listener's right), so sources straight ahead or straight
/// behind sit center. The pan eases in over `pan_width` so a source
/// passing right over the listener never snaps from hard left to hard
/// right.
pub fn stereo_pan(listener: &Pose2, source_pos: Vec2, pan_width: f32) -> f32 {
    let rel = normalize_angle(angle_to(listener.position, source_pos) - listener.facing);
    let lateral = rel.sin();

    let distance_factor = if pan_width > 0.0 {
        (distance(listener.position, source_pos) / pan_width).min(1.0)
    } else {
        1.0
    };

    (lateral * distance_factor * LATERAL_SCALE).clamp(-1.0, 1.0)
}
