//! Source directivity patterns.

/// Polar emission pattern of a source.
///
/// Maps the angle between the source's facing direction and the line to
/// the listener onto a gain in [0.0, 1.0]. Every pattern is 1.0 dead
/// ahead; rear lobes that would dip below zero clamp to silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectivityPattern {
    /// Equal gain in every direction
    #[default]
    Omnidirectional,
    /// Heart-shaped: full ahead, silent behind, half at +/-90 degrees
    Cardioid,
    /// Tighter front lobe than cardioid; silent past ~126 degrees
    Supercardioid,
    /// Tightest front lobe; silent past ~109 degrees
    Hypercardioid,
    /// Equal front and back lobes, silent to the sides
    Figure8,
    /// Forward half-plane only, cosine-shaped
    Hemisphere,
}

impl DirectivityPattern {
    /// Gain for a listener `angle_diff` radians off the source's facing
    /// direction. `angle_diff` is expected normalized to (-pi, pi].
    pub fn gain(self, angle_diff: f32) -> f32 {
        let cos = angle_diff.cos();
        let gain = match self {
            Self::Omnidirectional => 1.0,
            Self::Cardioid => 0.5 + 0.5 * cos,
            Self::Supercardioid => 0.37 + 0.63 * cos,
            Self::Hypercardioid => 0.25 + 0.75 * cos,
            Self::Figure8 => cos.abs(),
            Self::Hemisphere => cos,
        };
        gain.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const PATTERNS: [DirectivityPattern; 6] = [
        DirectivityPattern::Omnidirectional,
        DirectivityPattern::Cardioid,
        DirectivityPattern::Supercardioid,
        DirectivityPattern::Hypercardioid,
        DirectivityPattern::Figure8,
        DirectivityPattern::Hemisphere,
    ];

    #[test]
    fn full_gain_on_axis() {
        for pattern in PATTERNS {
            assert!((pattern.gain(0.0) - 1.0).abs() < 1e-6, "{pattern:?}");
        }
    }

    #[test]
    fn gain_stays_in_unit_range() {
        for pattern in PATTERNS {
            let mut theta = -PI;
            while theta <= PI {
                let g = pattern.gain(theta);
                assert!((0.0..=1.0).contains(&g), "{pattern:?} at {theta} gave {g}");
                theta += 0.05;
            }
        }
    }

    #[test]
    fn cardioid_landmarks() {
        let c = DirectivityPattern::Cardioid;
        assert!((c.gain(FRAC_PI_2) - 0.5).abs() < 1e-6);
        assert!(c.gain(PI) < 1e-6);
    }

    #[test]
    fn figure8_is_silent_to_the_sides() {
        let f = DirectivityPattern::Figure8;
        assert!(f.gain(FRAC_PI_2) < 1e-6);
        assert!((f.gain(PI) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hemisphere_rejects_the_rear_half() {
        let h = DirectivityPattern::Hemisphere;
        assert_eq!(h.gain(2.0), 0.0);
        assert_eq!(h.gain(PI), 0.0);
        assert!(h.gain(1.0) > 0.0);
    }

    #[test]
    fn tighter_patterns_reject_more_off_axis() {
        // At 120 degrees the supercardioid is nearly shut while the plain
        // cardioid still passes a quarter.
        let theta = 2.0 * PI / 3.0;
        let cardioid = DirectivityPattern::Cardioid.gain(theta);
        let supercardioid = DirectivityPattern::Supercardioid.gain(theta);
        let hypercardioid = DirectivityPattern::Hypercardioid.gain(theta);
        assert!(supercardioid < cardioid);
        assert!(hypercardioid < supercardioid);
    }

    #[test]
    fn patterns_are_symmetric() {
        for pattern in PATTERNS {
            for theta in [0.3f32, 1.0, 2.0, 3.0] {
                assert!(
                    (pattern.gain(theta) - pattern.gain(-theta)).abs() < 1e-6,
                    "{pattern:?} asymmetric at {theta}"
                );
            }
        }
    }
}
