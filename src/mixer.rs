// Mixer module - voice synthesis and mixing for the audio engine.
// Runs inside the device callback: drains pending commands, then renders
// every live voice into the interleaved output buffer.

use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender};

use crate::config::Waveform;
use crate::events::RoomtoneEvent;
use crate::output::{VoiceDescriptor, VoiceHandle};

/// Seconds over which gain and pan glide to their targets.
const RAMP_SECS: f32 = 0.03;

/// Commands crossing from the registry thread to the audio thread.
#[derive(Debug)]
pub(crate) enum MixerCommand {
    Start {
        handle: VoiceHandle,
        id: String,
        descriptor: VoiceDescriptor,
    },
    Stop {
        handle: VoiceHandle,
    },
    SetGain {
        handle: VoiceHandle,
        gain: f32,
    },
    SetPan {
        handle: VoiceHandle,
        pan: f32,
    },
    SetFrequency {
        handle: VoiceHandle,
        frequency: f32,
    },
}

struct Voice {
    id: String,
    waveform: Waveform,
    frequency: f32,
    /// Oscillator phase in [0, 1)
    phase: f32,
    gain: f32,
    gain_target: f32,
    pan: f32,
    pan_target: f32,
}

impl Voice {
    fn new(id: String, descriptor: &VoiceDescriptor) -> Self {
        Self {
            id,
            waveform: descriptor.waveform,
            frequency: descriptor.frequency.max(0.0),
            phase: 0.0,
            // Gain ramps up from silence so starts never click.
            gain: 0.0,
            gain_target: descriptor.gain.clamp(0.0, 1.0),
            pan: descriptor.pan.clamp(-1.0, 1.0),
            pan_target: descriptor.pan.clamp(-1.0, 1.0),
        }
    }

    /// Next mono sample, advancing the oscillator and parameter ramps.
    fn next_sample(&mut self, sample_rate: f32, smoothing: f32) -> f32 {
        self.gain += (self.gain_target - self.gain) * smoothing;
        self.pan += (self.pan_target - self.pan) * smoothing;

        let sample = self.waveform.sample(self.phase) * self.gain;
        self.phase += self.frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }
        sample
    }
}

/// All live voices plus the command/event plumbing. Owned by the engine,
/// locked briefly by the audio callback each buffer.
pub(crate) struct VoiceBank {
    voices: HashMap<VoiceHandle, Voice>,
    commands: Receiver<MixerCommand>,
    events: Sender<RoomtoneEvent>,
    sample_rate: f32,
    max_voices: usize,
    /// Per-sample one-pole coefficient realizing the RAMP_SECS glide
    smoothing: f32,
}

impl VoiceBank {
    pub(crate) fn new(
        commands: Receiver<MixerCommand>,
        events: Sender<RoomtoneEvent>,
        sample_rate: f32,
        max_voices: usize,
    ) -> Self {
        let sample_rate = sample_rate.max(1.0);
        let smoothing = 1.0 - (-1.0 / (RAMP_SECS * sample_rate)).exp();
        Self {
            voices: HashMap::new(),
            commands,
            events,
            sample_rate,
            max_voices,
            smoothing,
        }
    }

    pub(crate) fn voice_count(&self) -> usize {
        self.voices.len()
    }

    fn apply(&mut self, command: MixerCommand) {
        match command {
            MixerCommand::Start {
                handle,
                id,
                descriptor,
            } => {
                if self.voices.len() >= self.max_voices {
                    log::warn!(
                        "voice cap {} reached, dropping start for source {}",
                        self.max_voices,
                        id
                    );
                    return;
                }
                log::debug!("mixer: starting voice {handle} for source {id}");
                let _ = self.events.send(RoomtoneEvent::VoiceStarted { id: id.clone() });
                self.voices.insert(handle, Voice::new(id, &descriptor));
            }
            MixerCommand::Stop { handle } => {
                if let Some(voice) = self.voices.remove(&handle) {
                    log::debug!("mixer: stopped voice {handle} for source {}", voice.id);
                    let _ = self.events.send(RoomtoneEvent::VoiceStopped { id: voice.id });
                }
            }
            MixerCommand::SetGain { handle, gain } => {
                if let Some(voice) = self.voices.get_mut(&handle) {
                    voice.gain_target = gain.clamp(0.0, 1.0);
                }
            }
            MixerCommand::SetPan { handle, pan } => {
                if let Some(voice) = self.voices.get_mut(&handle) {
                    voice.pan_target = pan.clamp(-1.0, 1.0);
                }
            }
            MixerCommand::SetFrequency { handle, frequency } => {
                if let Some(voice) = self.voices.get_mut(&handle) {
                    voice.frequency = frequency.max(0.0);
                }
            }
        }
    }

    /// Renders one interleaved buffer: drains queued commands, then mixes
    /// every voice with an equal-power stereo split.
    pub(crate) fn fill(&mut self, data: &mut [f32], channels: usize) {
        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
        }

        data.fill(0.0);
        if channels == 0 {
            return;
        }
        let frames = data.len() / channels;

        for frame in 0..frames {
            let mut left = 0.0f32;
            let mut right = 0.0f32;

            for voice in self.voices.values_mut() {
                let sample = voice.next_sample(self.sample_rate, self.smoothing);
                let (l, r) = pan_gains(voice.pan);
                left += sample * l;
                right += sample * r;
            }

            let base = frame * channels;
            if channels >= 2 {
                data[base] = soft_clip(left);
                data[base + 1] = soft_clip(right);
            } else {
                // Mono device: average the stereo mix down.
                data[base] = soft_clip(0.5 * (left + right));
            }
        }
    }
}

/// Equal-power split of a pan position in [-1, 1] into (left, right) gains.
///
/// Perceived loudness stays constant across the sweep; center sits at
/// -3 dB per side.
pub fn pan_gains(pan: f32) -> (f32, f32) {
    let angle = (pan.clamp(-1.0, 1.0) + 1.0) * 0.25 * std::f32::consts::PI;
    (angle.cos(), angle.sin())
}

/// Soft clip (tanh-like) keeping the summed mix within [-1, 1]. Far past
/// the knee the curve rounds up to full scale exactly.
fn soft_clip(x: f32) -> f32 {
    if x.abs() < 0.5 {
        x
    } else {
        x.signum() * (1.0 - 0.5 * (-2.0 * (x.abs() - 0.5)).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn test_bank(max_voices: usize) -> (VoiceBank, Sender<MixerCommand>, Receiver<RoomtoneEvent>) {
        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let bank = VoiceBank::new(command_rx, event_tx, 48000.0, max_voices);
        (bank, command_tx, event_rx)
    }

    fn descriptor(gain: f32, pan: f32) -> VoiceDescriptor {
        VoiceDescriptor {
            frequency: 440.0,
            waveform: Waveform::Sine,
            gain,
            pan,
        }
    }

    fn channel_energy(data: &[f32], channels: usize, channel: usize) -> f32 {
        data.chunks(channels).map(|frame| frame[channel].abs()).sum()
    }

    #[test]
    fn started_voice_produces_audio() {
        let (mut bank, commands, events) = test_bank(8);
        let handle = VoiceHandle::new();
        commands
            .send(MixerCommand::Start {
                handle,
                id: "hum".into(),
                descriptor: descriptor(1.0, 0.0),
            })
            .unwrap();

        let mut data = vec![0.0f32; 2 * 4800];
        bank.fill(&mut data, 2);

        assert_eq!(bank.voice_count(), 1);
        assert!(data.iter().any(|s| s.abs() > 0.01));
        assert_eq!(
            events.try_recv().unwrap(),
            RoomtoneEvent::VoiceStarted { id: "hum".into() }
        );
    }

    #[test]
    fn gain_ramps_in_from_silence() {
        let (mut bank, commands, _events) = test_bank(8);
        let handle = VoiceHandle::new();
        commands
            .send(MixerCommand::Start {
                handle,
                id: "hum".into(),
                descriptor: descriptor(1.0, 0.0),
            })
            .unwrap();

        let mut data = vec![0.0f32; 2 * 4800];
        bank.fill(&mut data, 2);

        let head: f32 = data[..32].iter().map(|s| s.abs()).sum();
        let tail: f32 = data[data.len() - 32..].iter().map(|s| s.abs()).sum();
        assert!(head < tail, "expected fade-in: head {head}, tail {tail}");
    }

    #[test]
    fn hard_pan_moves_energy_to_one_channel() {
        let (mut bank, commands, _events) = test_bank(8);
        let handle = VoiceHandle::new();
        commands
            .send(MixerCommand::Start {
                handle,
                id: "hum".into(),
                descriptor: descriptor(1.0, 1.0),
            })
            .unwrap();

        let mut data = vec![0.0f32; 2 * 4800];
        bank.fill(&mut data, 2);

        let left = channel_energy(&data, 2, 0);
        let right = channel_energy(&data, 2, 1);
        assert!(right > left * 100.0, "left {left}, right {right}");
    }

    #[test]
    fn stop_silences_and_reports() {
        let (mut bank, commands, events) = test_bank(8);
        let handle = VoiceHandle::new();
        commands
            .send(MixerCommand::Start {
                handle,
                id: "hum".into(),
                descriptor: descriptor(1.0, 0.0),
            })
            .unwrap();
        let mut data = vec![0.0f32; 2 * 256];
        bank.fill(&mut data, 2);

        commands.send(MixerCommand::Stop { handle }).unwrap();
        bank.fill(&mut data, 2);

        assert_eq!(bank.voice_count(), 0);
        assert!(data.iter().all(|s| *s == 0.0));
        let events: Vec<_> = events.try_iter().collect();
        assert_eq!(
            events,
            vec![
                RoomtoneEvent::VoiceStarted { id: "hum".into() },
                RoomtoneEvent::VoiceStopped { id: "hum".into() },
            ]
        );
    }

    #[test]
    fn voice_cap_drops_excess_starts() {
        let (mut bank, commands, events) = test_bank(1);
        for i in 0..3 {
            commands
                .send(MixerCommand::Start {
                    handle: VoiceHandle::new(),
                    id: format!("s{i}"),
                    descriptor: descriptor(0.5, 0.0),
                })
                .unwrap();
        }

        let mut data = vec![0.0f32; 2 * 64];
        bank.fill(&mut data, 2);

        assert_eq!(bank.voice_count(), 1);
        assert_eq!(events.try_iter().count(), 1);
    }

    #[test]
    fn commands_for_unknown_handles_are_ignored() {
        let (mut bank, commands, _events) = test_bank(8);
        let stray = VoiceHandle::new();
        commands.send(MixerCommand::SetGain { handle: stray, gain: 0.5 }).unwrap();
        commands.send(MixerCommand::SetPan { handle: stray, pan: -1.0 }).unwrap();
        commands
            .send(MixerCommand::SetFrequency { handle: stray, frequency: 880.0 })
            .unwrap();
        commands.send(MixerCommand::Stop { handle: stray }).unwrap();

        let mut data = vec![0.0f32; 2 * 64];
        bank.fill(&mut data, 2);
        assert_eq!(bank.voice_count(), 0);
    }

    #[test]
    fn mono_output_downmixes() {
        let (mut bank, commands, _events) = test_bank(8);
        commands
            .send(MixerCommand::Start {
                handle: VoiceHandle::new(),
                id: "hum".into(),
                descriptor: descriptor(1.0, -1.0),
            })
            .unwrap();

        let mut data = vec![0.0f32; 4800];
        bank.fill(&mut data, 1);
        assert!(data.iter().any(|s| s.abs() > 0.01));
        assert!(data.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn mix_stays_inside_unit_range() {
        let (mut bank, commands, _events) = test_bank(16);
        for i in 0..10 {
            commands
                .send(MixerCommand::Start {
                    handle: VoiceHandle::new(),
                    id: format!("s{i}"),
                    descriptor: VoiceDescriptor {
                        frequency: 100.0 + 50.0 * i as f32,
                        waveform: Waveform::Square,
                        gain: 1.0,
                        pan: 0.0,
                    },
                })
                .unwrap();
        }

        let mut data = vec![0.0f32; 2 * 9600];
        bank.fill(&mut data, 2);
        assert!(data.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn pan_gains_are_equal_power() {
        let (l, r) = pan_gains(0.0);
        assert!((l - r).abs() < 1e-6);
        assert!(((l * l + r * r) - 1.0).abs() < 1e-5);

        let (l, r) = pan_gains(-1.0);
        assert!((l - 1.0).abs() < 1e-6);
        assert!(r.abs() < 1e-6);

        let (l, r) = pan_gains(1.0);
        assert!(l.abs() < 1e-6);
        assert!((r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn soft_clip_is_gentle_and_bounded() {
        assert_eq!(soft_clip(0.25), 0.25);
        assert!(soft_clip(0.75) < 0.75);
        for x in [-10.0f32, -2.0, 2.0, 10.0] {
            assert!(soft_clip(x).abs() <= 1.0);
        }
        // Deep into the limb the f32 curve saturates to exactly full scale.
        assert_eq!(soft_clip(10.0), 1.0);
        assert_eq!(soft_clip(-10.0), -1.0);
        assert!(soft_clip(3.0) > 0.0);
        assert!(soft_clip(-3.0) < 0.0);
    }
}
