use crate::spatial::DistanceModel;

/// Scene-wide acoustic settings.
///
/// The registry recomputes every active source whenever one of these
/// changes, so edits take effect immediately.
#[derive(Debug, Clone)]
pub struct AcousticsSettings {
    /// Distance falloff curve
    pub distance_model: DistanceModel,
    /// Final multiplier applied to every computed volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Hard audibility cutoff; sources at or beyond this distance are silent
    pub max_distance: f32,
    /// Distance inside which no falloff applies
    pub ref_distance: f32,
    /// Falloff steepness passed to the distance model
    pub rolloff: f32,
    /// Gain floor for sources directly behind the listener (0.0 - 1.0)
    pub rear_gain_floor: f32,
    /// Energy fraction passing through each wall that carries no material (0.0 - 1.0)
    pub wall_transmission: f32,
    /// Distance at which stereo panning reaches full strength
    pub pan_width: f32,
}

impl Default for AcousticsSettings {
    fn default() -> Self {
        Self {
            distance_model: DistanceModel::Inverse,
            master_volume: 1.0,
            max_distance: 50.0,
            ref_distance: 1.0,
            rolloff: 1.0,
            rear_gain_floor: 0.3,
            wall_transmission: 0.3,
            pan_width: 3.0,
        }
    }
}

impl AcousticsSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance_model(mut self, model: DistanceModel) -> Self {
        self.distance_model = model;
        self
    }

    pub fn master_volume(mut self, volume: f32) -> Self {
        self.master_volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    pub fn ref_distance(mut self, distance: f32) -> Self {
        self.ref_distance = distance;
        self
    }

    pub fn rolloff(mut self, rolloff: f32) -> Self {
        self.rolloff = rolloff;
        self
    }

    pub fn rear_gain_floor(mut self, floor: f32) -> Self {
        self.rear_gain_floor = floor.clamp(0.0, 1.0);
        self
    }

    pub fn wall_transmission(mut self, transmission: f32) -> Self {
        self.wall_transmission = transmission.clamp(0.0, 1.0);
        self
    }

    pub fn pan_width(mut self, width: f32) -> Self {
        self.pan_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_clamps_fractional_fields() {
        let settings = AcousticsSettings::new()
            .master_volume(1.5)
            .rear_gain_floor(-0.2)
            .wall_transmission(2.0);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.rear_gain_floor, 0.0);
        assert_eq!(settings.wall_transmission, 1.0);
    }
}
