//! Per-source parameter composition.

use crate::config::{AcousticsSettings, SourceConfig};
use crate::math::{angle_to, distance, normalize_angle, Pose2};
use crate::scene::{transmission_between, Wall};
use crate::spatial::hearing::listener_gain;
use crate::spatial::pan::stereo_pan;

/// Computed rendering parameters for one (source, listener, walls) query.
///
/// Transient: derived fresh on every evaluation, never cached. The
/// intermediate factors ride along with the final volume so callers can
/// show diagnostics like "2 walls, 9% through".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioParams {
    /// Final gain in [0.0, 1.0]: base volume times every spatial factor
    /// times the master volume
    pub volume: f32,
    /// Stereo placement in [-1.0, 1.0], positive to the listener's right
    pub pan: f32,
    /// Source-to-listener distance
    pub distance: f32,
    /// Source directivity times listener hearing, in [0.0, 1.0]
    pub directional_gain: f32,
    /// Fraction of energy surviving all wall crossings, in [0.0, 1.0]
    pub wall_attenuation: f32,
    /// Number of walls crossing the direct path
    pub wall_count: usize,
}

/// Computes the rendering parameters for `source` as heard by `listener`.
///
/// Pure: identical inputs always yield identical output, and nothing is
/// mutated. The registry calls this on every scene edit; hosts can also
/// call it directly for previews of sources that are not playing.
pub fn compute_params(
    source: &SourceConfig,
    listener: &Pose2,
    walls: &[Wall],
    settings: &AcousticsSettings,
) -> AudioParams {
    let dist = distance(source.position, listener.position);

    let dist_atten = settings.distance_model.attenuation(
        dist,
        settings.ref_distance,
        settings.max_distance,
        settings.rolloff,
    );

    let outgoing = normalize_angle(angle_to(source.position, listener.position) - source.facing);
    let source_gain = source.directivity.gain(outgoing);
    let hearing = listener_gain(listener, source.position, settings.rear_gain_floor);
    let directional_gain = source_gain * hearing;

    let (wall_count, wall_atten) = transmission_between(
        source.position,
        listener.position,
        walls,
        settings.wall_transmission,
    );

    let pan = stereo_pan(listener, source.position, settings.pan_width);

    let volume = (source.volume * dist_atten * directional_gain * wall_atten
        * settings.master_volume)
        .clamp(0.0, 1.0);

    AudioParams {
        volume,
        pan,
        distance: dist,
        directional_gain,
        wall_attenuation: wall_atten,
        wall_count,
    }
}
