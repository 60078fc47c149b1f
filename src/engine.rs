use crate::config::RoomtoneWorldDesc;
use crate::error::{Result, RoomtoneError};
use crate::events::RoomtoneEvent;
use crate::mixer::{MixerCommand, VoiceBank};
use crate::output::{OutputPort, VoiceDescriptor, VoiceHandle};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Audio engine that owns the output stream and synthesizes voices.
///
/// The engine itself never touches scene state. It receives voice
/// commands through the [`EnginePort`] handed to a
/// [`crate::world::RoomtoneWorld`], mixes all live voices in the device
/// callback, and reports lifecycle through [`RoomtoneEvent`]s.
///
/// Voices started before [`start`](Self::start) queue up and begin
/// sounding once the stream runs; stopping the engine keeps the voice set
/// alive, so a later restart resumes them.
pub struct RoomtoneEngine {
    desc: RoomtoneWorldDesc,
    stream: Option<cpal::Stream>,
    is_running: Arc<AtomicBool>,
    frames_processed: Arc<AtomicUsize>,
    bank: Arc<Mutex<VoiceBank>>,
    command_tx: Sender<MixerCommand>,
    event_tx: Sender<RoomtoneEvent>,
    event_rx: Receiver<RoomtoneEvent>,
}

impl RoomtoneEngine {
    /// Create a new audio engine; no device is opened until `start`.
    pub fn new(desc: RoomtoneWorldDesc) -> Result<Self> {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();
        let bank = VoiceBank::new(
            command_rx,
            event_tx.clone(),
            desc.sample_rate as f32,
            desc.max_sources,
        );
        Ok(Self {
            desc,
            stream: None,
            is_running: Arc::new(AtomicBool::new(false)),
            frames_processed: Arc::new(AtomicUsize::new(0)),
            bank: Arc::new(Mutex::new(bank)),
            command_tx,
            event_tx,
            event_rx,
        })
    }

    /// The command side of this engine, for a world to own as its output
    /// port. Clones are cheap and all feed the same mixer.
    pub fn port(&self) -> EnginePort {
        EnginePort {
            commands: self.command_tx.clone(),
        }
    }

    /// Open the default output device and start the stream.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running.load(Ordering::Relaxed) {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or_else(|| {
            RoomtoneError::AudioDevice("No default output device available".into())
        })?;

        let config = cpal::StreamConfig {
            channels: self.desc.channels,
            sample_rate: cpal::SampleRate(self.desc.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(self.desc.block_size as u32),
        };

        let default_config = device.default_output_config().map_err(|e| {
            RoomtoneError::AudioDevice(format!("Failed to get default config: {e}"))
        })?;

        let stream = match default_config.sample_format() {
            cpal::SampleFormat::F32 => self.create_stream::<f32>(&device, &config)?,
            cpal::SampleFormat::I16 => self.create_stream::<i16>(&device, &config)?,
            cpal::SampleFormat::U16 => self.create_stream::<u16>(&device, &config)?,
            format => {
                return Err(RoomtoneError::AudioFormat(format!(
                    "Unsupported sample format: {format:?}"
                )));
            }
        };

        stream
            .play()
            .map_err(|e| RoomtoneError::AudioDevice(format!("Failed to start stream: {e}")))?;

        self.stream = Some(stream);
        self.is_running.store(true, Ordering::Relaxed);
        let _ = self.event_tx.send(RoomtoneEvent::EngineStarted);
        log::info!(
            "engine started: {} Hz, {} channels, block {}",
            self.desc.sample_rate,
            self.desc.channels,
            self.desc.block_size
        );

        Ok(())
    }

    /// Stop the audio stream. Live voices stay queued for a restart.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            self.is_running.store(false, Ordering::Relaxed);
            drop(stream); // This stops the stream
            let _ = self.event_tx.send(RoomtoneEvent::EngineStopped);
            log::info!("engine stopped");
        }
        Ok(())
    }

    /// Check if the engine is currently running
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Get the number of audio frames processed since start
    pub fn frames_processed(&self) -> usize {
        self.frames_processed.load(Ordering::Relaxed)
    }

    /// Get the engine configuration
    pub fn config(&self) -> &RoomtoneWorldDesc {
        &self.desc
    }

    /// Drain every pending engine event without blocking.
    pub fn poll_events(&self) -> Vec<RoomtoneEvent> {
        self.event_rx.try_iter().collect()
    }

    /// Create a typed audio stream
    fn create_stream<T>(&self, device: &cpal::Device, config: &cpal::StreamConfig) -> Result<cpal::Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = config.channels as usize;
        let bank = Arc::clone(&self.bank);
        let is_running = Arc::clone(&self.is_running);
        let frames_processed = Arc::clone(&self.frames_processed);
        let event_tx = self.event_tx.clone();
        // Reused across callbacks so the audio thread does not allocate.
        let mut scratch: Vec<f32> = Vec::new();

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    scratch.resize(data.len(), 0.0);

                    if is_running.load(Ordering::Relaxed) {
                        match bank.try_lock() {
                            Ok(mut bank) => bank.fill(&mut scratch, channels),
                            Err(_) => {
                                log::warn!("Failed to acquire voice bank lock in audio callback");
                                scratch.fill(0.0);
                            }
                        }
                    } else {
                        scratch.fill(0.0);
                    }

                    for (out, &sample) in data.iter_mut().zip(scratch.iter()) {
                        *out = T::from_sample(sample);
                    }
                    frames_processed.fetch_add(data.len() / channels.max(1), Ordering::Relaxed);
                },
                move |err| {
                    log::error!("Audio stream error: {err}");
                    let _ = event_tx.send(RoomtoneEvent::EngineError {
                        error: err.to_string(),
                    });
                },
                None,
            )
            .map_err(|e| RoomtoneError::AudioDevice(format!("Failed to build stream: {e}")))?;

        Ok(stream)
    }
}

impl Drop for RoomtoneEngine {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Command side of a [`RoomtoneEngine`], implementing [`OutputPort`].
///
/// Sends are fire-and-forget and never block on the audio thread. They
/// fail only once the engine itself has been dropped, which surfaces as
/// [`RoomtoneError::OutputUnavailable`] from `start`.
#[derive(Clone)]
pub struct EnginePort {
    commands: Sender<MixerCommand>,
}

impl OutputPort for EnginePort {
    fn start(&mut self, id: &str, descriptor: &VoiceDescriptor) -> Result<VoiceHandle> {
        let handle = VoiceHandle::new();
        self.commands
            .send(MixerCommand::Start {
                handle,
                id: id.to_string(),
                descriptor: *descriptor,
            })
            .map_err(|_| {
                RoomtoneError::OutputUnavailable(format!(
                    "engine is gone, cannot start source {id}"
                ))
            })?;
        Ok(handle)
    }

    fn stop(&mut self, handle: VoiceHandle) {
        let _ = self.commands.send(MixerCommand::Stop { handle });
    }

    fn set_gain(&mut self, handle: VoiceHandle, gain: f32) {
        let _ = self.commands.send(MixerCommand::SetGain { handle, gain });
    }

    fn set_pan(&mut self, handle: VoiceHandle, pan: f32) {
        let _ = self.commands.send(MixerCommand::SetPan { handle, pan });
    }

    fn set_frequency(&mut self, handle: VoiceHandle, frequency: f32) {
        let _ = self
            .commands
            .send(MixerCommand::SetFrequency { handle, frequency });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Waveform;

    fn descriptor() -> VoiceDescriptor {
        VoiceDescriptor {
            frequency: 440.0,
            waveform: Waveform::Sine,
            gain: 0.5,
            pan: 0.0,
        }
    }

    #[test]
    fn engine_starts_idle() {
        let engine = RoomtoneEngine::new(RoomtoneWorldDesc::default()).unwrap();
        assert!(!engine.is_running());
        assert_eq!(engine.frames_processed(), 0);
        assert!(engine.poll_events().is_empty());
    }

    #[test]
    fn port_accepts_commands_while_engine_exists() {
        let engine = RoomtoneEngine::new(RoomtoneWorldDesc::default()).unwrap();
        let mut port = engine.port();

        let handle = port.start("hum", &descriptor()).unwrap();
        port.set_gain(handle, 0.2);
        port.set_pan(handle, -0.5);
        port.set_frequency(handle, 880.0);
        port.stop(handle);
    }

    #[test]
    fn port_reports_unavailable_after_engine_drop() {
        let engine = RoomtoneEngine::new(RoomtoneWorldDesc::default()).unwrap();
        let mut port = engine.port();
        drop(engine);

        let err = port.start("hum", &descriptor()).unwrap_err();
        assert!(matches!(err, RoomtoneError::OutputUnavailable(_)));
        // Fire-and-forget calls must stay silent no-ops.
        port.stop(VoiceHandle::new());
        port.set_gain(VoiceHandle::new(), 0.1);
    }

    #[test]
    fn cloned_ports_feed_the_same_engine() {
        let engine = RoomtoneEngine::new(RoomtoneWorldDesc::default()).unwrap();
        let mut a = engine.port();
        let mut b = a.clone();
        a.start("one", &descriptor()).unwrap();
        b.start("two", &descriptor()).unwrap();
    }
}
