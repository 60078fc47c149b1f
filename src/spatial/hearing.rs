//! Listener directional hearing.

use crate::math::{angle_to, normalize_angle, Pose2, Vec2};

/// How well the listener hears a source at `source_pos`, in
/// [`min_gain`, 1.0].
///
/// Cosine-weighted: full gain straight ahead, easing down to the floor
/// directly behind. The floor keeps rear sources audible rather than
/// muting half the scene; pass 0.0 for true deafness to the rear.
pub fn listener_gain(listener: &Pose2, source_pos: Vec2, min_gain: f32) -> f32 {
    let min_gain = min_gain.clamp(0.0, 1.0);
    let rel = normalize_angle(angle_to(listener.position, source_pos) - listener.facing);
    let raw = 0.5 + 0.5 * rel.cos();
    min_gain + (1.0 - min_gain) * raw
}
