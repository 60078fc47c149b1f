use crate::config::{AcousticsSettings, SourceConfig};
use crate::error::Result;
use crate::math::{normalize_angle, Pose2, Vec2};
use crate::output::{NullOutput, OutputPort, VoiceDescriptor, VoiceHandle};
use crate::scene::Wall;
use crate::spatial::{compute_params, AudioParams, DistanceModel};
use std::collections::HashMap;

/// Main world object: the source/listener registry.
///
/// `RoomtoneWorld` owns the live scene: sources keyed by caller-assigned
/// string ids, the listener pose, the wall set and the acoustic settings.
/// It drives an [`OutputPort`] so the audible voices always track the
/// computed parameters. Every mutation recomputes exactly the sources it
/// affects and pushes fresh gain/pan targets to the port.
///
/// # Architecture
///
/// - **Caller thread**: owns the `RoomtoneWorld`, feeds it scene updates
///   (pointer drags, geometry edits, settings changes)
/// - **Audio thread**: owned by the output port implementation; receives
///   fire-and-forget voice commands and does its own smoothing
///
/// The world itself is single-threaded and synchronous: every operation
/// runs to completion before returning. A concurrent host must serialize
/// access (e.g. behind one mutex); nothing here locks internally.
pub struct RoomtoneWorld {
    settings: AcousticsSettings,
    listener: Pose2,
    walls: Vec<Wall>,
    sources: HashMap<String, SourceConfig>,
    /// Handles for currently-active sources, keyed like `sources`
    voices: HashMap<String, VoiceHandle>,
    output: Box<dyn OutputPort>,
}

impl RoomtoneWorld {
    /// Creates a world with no audible output.
    ///
    /// Parameter queries work in full; playback is simply absent. The
    /// right constructor for tests and parameter-only hosts.
    pub fn new(settings: AcousticsSettings) -> Self {
        Self::with_output(settings, Box::new(NullOutput))
    }

    /// Creates a world that drives the given output port, typically an
    /// [`crate::engine::EnginePort`].
    pub fn with_output(settings: AcousticsSettings, output: Box<dyn OutputPort>) -> Self {
        Self {
            settings,
            listener: Pose2::default(),
            walls: Vec::new(),
            sources: HashMap::new(),
            voices: HashMap::new(),
            output,
        }
    }

    pub fn listener(&self) -> Pose2 {
        self.listener
    }

    pub fn settings(&self) -> &AcousticsSettings {
        &self.settings
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    /// Whether the source currently has a live voice.
    pub fn is_active(&self, id: &str) -> bool {
        self.voices.contains_key(id)
    }

    pub fn source(&self, id: &str) -> Option<&SourceConfig> {
        self.sources.get(id)
    }

    /// Ids of every registered source, in no particular order.
    pub fn source_ids(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    /// Ids of every source with a live voice, in no particular order.
    pub fn active_ids(&self) -> Vec<String> {
        self.voices.keys().cloned().collect()
    }

    /// Computed parameters for a source, without side effects.
    ///
    /// Works for inactive sources too (e.g. UI previews). `None` only for
    /// unknown ids.
    pub fn parameters(&self, id: &str) -> Option<AudioParams> {
        self.sources
            .get(id)
            .map(|source| compute_params(source, &self.listener, &self.walls, &self.settings))
    }

    /// Inserts or replaces a source.
    ///
    /// With `config.playing` set the source's voice starts (or restarts
    /// when the waveform changed, since the port cannot morph a running
    /// voice's shape); with it clear any running voice stops.
    ///
    /// # Errors
    ///
    /// [`crate::error::RoomtoneError::OutputUnavailable`] when a voice
    /// should start but the output port cannot produce sound. The config
    /// is stored either way.
    pub fn upsert_source(&mut self, id: &str, config: SourceConfig) -> Result<()> {
        let restart = self.voices.contains_key(id)
            && self
                .sources
                .get(id)
                .is_some_and(|old| old.waveform != config.waveform);
        let playing = config.playing;
        self.sources.insert(id.to_string(), config);
        log::debug!("upsert source {id} (playing: {playing})");

        if restart {
            self.stop_voice(id);
        }
        if playing {
            if self.voices.contains_key(id) {
                if let (Some(source), Some(&handle)) = (self.sources.get(id), self.voices.get(id)) {
                    self.output.set_frequency(handle, source.frequency);
                }
                self.push_params(id);
            } else {
                self.start_voice(id)?;
            }
        } else {
            self.stop_voice(id);
        }
        Ok(())
    }

    /// Removes a source, stopping its voice first. Unknown ids are
    /// silently ignored.
    pub fn remove_source(&mut self, id: &str) {
        self.stop_voice(id);
        if self.sources.remove(id).is_some() {
            log::debug!("removed source {id}");
        }
    }

    /// Moves a source, then recomputes and pushes its parameters if it is
    /// active. Unknown ids are silently ignored.
    pub fn set_source_position(&mut self, id: &str, position: Vec2) {
        if let Some(source) = self.sources.get_mut(id) {
            source.position = position;
            self.push_params(id);
        }
    }

    /// Turns a source, then recomputes and pushes its parameters if it is
    /// active. Unknown ids are silently ignored.
    pub fn set_source_facing(&mut self, id: &str, facing: f32) {
        if let Some(source) = self.sources.get_mut(id) {
            source.facing = facing;
            self.push_params(id);
        }
    }

    /// Replaces the listener pose and recomputes every active source;
    /// listener movement affects all of them at once.
    pub fn set_listener(&mut self, pose: Pose2) {
        self.listener = Pose2::new(pose.position, pose.facing);
        self.recompute_active();
    }

    pub fn set_listener_position(&mut self, position: Vec2) {
        self.listener.position = position;
        self.recompute_active();
    }

    pub fn set_listener_facing(&mut self, facing: f32) {
        self.listener.facing = normalize_angle(facing);
        self.recompute_active();
    }

    /// Replaces the wall set and recomputes every active source.
    pub fn set_walls(&mut self, walls: Vec<Wall>) {
        self.walls = walls;
        self.recompute_active();
    }

    pub fn set_distance_model(&mut self, model: DistanceModel) {
        self.settings.distance_model = model;
        self.recompute_active();
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.settings.master_volume = volume.clamp(0.0, 1.0);
        self.recompute_active();
    }

    /// Replaces the whole settings block and recomputes every active
    /// source. For hosts editing fields the dedicated setters do not
    /// cover (cutoff distance, rear floor, wall transmission).
    pub fn set_settings(&mut self, settings: AcousticsSettings) {
        self.settings = settings;
        self.recompute_active();
    }

    /// Flips a source's active state and returns the new state.
    ///
    /// Unknown ids are a no-op returning `Ok(false)`. The stored config's
    /// `playing` flag mirrors the result.
    ///
    /// # Errors
    ///
    /// [`crate::error::RoomtoneError::OutputUnavailable`] when activating
    /// and the output port cannot produce sound.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        if !self.sources.contains_key(id) {
            return Ok(false);
        }

        let active = if self.voices.contains_key(id) {
            self.stop_voice(id);
            false
        } else {
            self.start_voice(id)?;
            true
        };

        if let Some(source) = self.sources.get_mut(id) {
            source.playing = active;
        }
        log::debug!("toggle source {id} -> {active}");
        Ok(active)
    }

    /// Recomputes and pushes parameters for every active source.
    ///
    /// The mutating operations call this on their own; it is public so a
    /// host batching edits or driving a frame loop can force a refresh.
    pub fn recompute_active(&mut self) {
        let ids: Vec<String> = self.voices.keys().cloned().collect();
        for id in ids {
            self.push_params(&id);
        }
    }

    /// Starts the voice for `id` with freshly computed parameters.
    fn start_voice(&mut self, id: &str) -> Result<()> {
        let Some(source) = self.sources.get(id) else {
            return Ok(());
        };
        let params = compute_params(source, &self.listener, &self.walls, &self.settings);
        let descriptor = VoiceDescriptor {
            frequency: source.frequency,
            waveform: source.waveform,
            gain: params.volume,
            pan: params.pan,
        };
        let handle = self.output.start(id, &descriptor)?;
        self.voices.insert(id.to_string(), handle);
        log::debug!("started voice {handle} for source {id}");
        Ok(())
    }

    /// Stops the voice for `id` if one is live.
    fn stop_voice(&mut self, id: &str) {
        if let Some(handle) = self.voices.remove(id) {
            self.output.stop(handle);
            log::debug!("stopped voice {handle} for source {id}");
        }
    }

    /// Recomputes one active source and pushes gain and pan targets.
    fn push_params(&mut self, id: &str) {
        let (Some(source), Some(&handle)) = (self.sources.get(id), self.voices.get(id)) else {
            return;
        };
        let params = compute_params(source, &self.listener, &self.walls, &self.settings);
        self.output.set_gain(handle, params.volume);
        self.output.set_pan(handle, params.pan);
    }
}
