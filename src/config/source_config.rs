use crate::math::Vec2;
use crate::spatial::DirectivityPattern;

/// Waveform shapes the built-in synthesizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Sample the waveform at `phase` in [0, 1). Output is in [-1, 1].
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Self::Sine => (std::f32::consts::TAU * phase).sin(),
            Self::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Sawtooth => 2.0 * phase - 1.0,
            Self::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

/// Configuration for a single sound source.
///
/// Plain data: inserting one into a world is what gives it life. `playing`
/// is the desired active state; the registry keeps it in sync with the
/// actual voice.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    /// Position in the plane
    pub position: Vec2,
    /// Emission direction in radians
    pub facing: f32,
    /// Emission pattern around `facing`
    pub directivity: DirectivityPattern,
    /// Base gain before spatial factors (0.0 - 1.0)
    pub volume: f32,
    /// Synthesis frequency in Hz
    pub frequency: f32,
    pub waveform: Waveform,
    /// Whether the source should currently sound
    pub playing: bool,
}

impl SourceConfig {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            facing: 0.0,
            directivity: DirectivityPattern::Omnidirectional,
            volume: 1.0,
            frequency: 440.0,
            waveform: Waveform::Sine,
            playing: false,
        }
    }

    pub fn facing(mut self, facing: f32) -> Self {
        self.facing = facing;
        self
    }

    pub fn directivity(mut self, pattern: DirectivityPattern) -> Self {
        self.directivity = pattern;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency.max(0.0);
        self
    }

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }
}
