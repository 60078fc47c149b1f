//! Audio output port.
//!
//! The registry in [`crate::world`] drives playback exclusively through
//! the [`OutputPort`] trait. [`crate::engine::RoomtoneEngine`] provides
//! the real cpal-backed implementation; [`NullOutput`] covers headless
//! hosts and tests.

use crate::config::Waveform;
use crate::error::Result;
use uuid::Uuid;

/// Opaque token for a started voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceHandle(Uuid);

impl VoiceHandle {
    /// Mints a fresh handle. Implementations of [`OutputPort::start`]
    /// call this; handles are never reused.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VoiceHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VoiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "voice-{}", self.0)
    }
}

/// Everything the output side needs to start a voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceDescriptor {
    /// Synthesis frequency in Hz
    pub frequency: f32,
    pub waveform: Waveform,
    /// Initial gain, already fully composed by the registry
    pub gain: f32,
    /// Initial stereo placement in [-1.0, 1.0]
    pub pan: f32,
}

/// Platform audio output consumed by the registry.
///
/// Calls are fire-and-forget: the registry never waits on the audio
/// thread, and the only ordering it relies on is that a start is honored
/// before any later stop of the same voice. Gain and pan targets arrive
/// raw; smoothing them over ~20-50 ms is the implementation's job.
pub trait OutputPort: Send {
    /// Starts a voice for source `id` and returns its handle.
    ///
    /// # Errors
    ///
    /// [`crate::error::RoomtoneError::OutputUnavailable`] when the port
    /// can no longer produce sound (device gone, engine dropped).
    fn start(&mut self, id: &str, descriptor: &VoiceDescriptor) -> Result<VoiceHandle>;

    /// Stops a voice. Unknown handles are ignored.
    fn stop(&mut self, handle: VoiceHandle);

    /// Retargets a voice's gain. Unknown handles are ignored.
    fn set_gain(&mut self, handle: VoiceHandle, gain: f32);

    /// Retargets a voice's stereo placement. Unknown handles are ignored.
    fn set_pan(&mut self, handle: VoiceHandle, pan: f32);

    /// Retargets a voice's frequency. Unknown handles are ignored.
    fn set_frequency(&mut self, handle: VoiceHandle, frequency: f32);
}

/// Output port that produces no sound.
///
/// The default for worlds built with [`crate::world::RoomtoneWorld::new`]:
/// parameter computation works in full, playback is simply absent.
#[derive(Debug, Default)]
pub struct NullOutput;

impl OutputPort for NullOutput {
    fn start(&mut self, id: &str, _descriptor: &VoiceDescriptor) -> Result<VoiceHandle> {
        log::debug!("null output: start for source {id}");
        Ok(VoiceHandle::new())
    }

    fn stop(&mut self, _handle: VoiceHandle) {}

    fn set_gain(&mut self, _handle: VoiceHandle, _gain: f32) {}

    fn set_pan(&mut self, _handle: VoiceHandle, _pan: f32) {}

    fn set_frequency(&mut self, _handle: VoiceHandle, _frequency: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let a = VoiceHandle::new();
        let b = VoiceHandle::new();
        assert_ne!(a, b);
    }

    #[test]
    fn null_output_always_starts() {
        let mut port = NullOutput;
        let descriptor = VoiceDescriptor {
            frequency: 440.0,
            waveform: Waveform::Sine,
            gain: 0.5,
            pan: 0.0,
        };
        let handle = port.start("any", &descriptor).unwrap();
        port.set_gain(handle, 0.2);
        port.stop(handle);
    }
}
