//! # Roomtone
//!
//! A 2D positional audio engine: given sources, a listener and walls in a
//! plane, Roomtone computes per-source rendering parameters (gain, stereo
//! pan, directional attenuation and wall occlusion) and keeps a real
//! audio output in sync with them.
//!
//! The world-driven API runs on the caller's thread: a [`RoomtoneWorld`]
//! owns the scene and recomputes parameters on every edit, pushing fresh
//! targets through an [`OutputPort`]. The bundled [`RoomtoneEngine`]
//! implements that port on top of cpal, synthesizing one oscillator voice
//! per active source and smoothing all transitions on the audio thread.
//!
//! ## Quick Start
//!
//! ```no_run
//! use roomtone::{
//!     AcousticsSettings, RoomtoneEngine, RoomtoneWorld, RoomtoneWorldDesc, SourceConfig, Vec2,
//!     Wall,
//! };
//!
//! # fn main() -> roomtone::Result<()> {
//! // Create the engine and a world wired to it
//! let mut engine = RoomtoneEngine::new(RoomtoneWorldDesc::default())?;
//! let mut world = RoomtoneWorld::with_output(
//!     AcousticsSettings::default(),
//!     Box::new(engine.port()),
//! );
//! engine.start()?;
//!
//! // A humming machine three meters ahead, behind one wall
//! world.set_walls(vec![Wall::new(Vec2::new(1.5, -2.0), Vec2::new(1.5, 2.0))]);
//! world.upsert_source(
//!     "hum",
//!     SourceConfig::new(Vec2::new(3.0, 0.0)).frequency(120.0).playing(true),
//! )?;
//!
//! // Walk the listener; the voice retargets automatically
//! world.set_listener_position(Vec2::new(0.0, 1.0));
//!
//! // Inspect what the engine computed
//! if let Some(params) = world.parameters("hum") {
//!     println!(
//!         "volume {:.2}, pan {:+.2}, {} wall(s)",
//!         params.volume, params.pan, params.wall_count
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Components
//!
//! - **[`RoomtoneWorld`]**: the source/listener registry; every scene edit
//!   recomputes exactly the sources it affects
//! - **[`compute_params`]**: the pure compositor underneath it all, usable
//!   standalone for previews and tooling
//! - **[`RoomtoneEngine`]**: cpal-backed synthesis engine implementing
//!   [`OutputPort`]; [`NullOutput`] for headless use
//! - **[`AcousticsSettings`]**: distance model, master volume, rear-gain
//!   floor, wall transmission and friends
//! - **[`RoomtoneEvent`]**: engine lifecycle and voice notifications
//!
//! ## Architecture
//!
//! 1. **Caller thread**: owns `RoomtoneWorld`, applies scene edits, reads
//!    parameters
//! 2. **Audio callback**: owned by cpal, drains voice commands from a
//!    channel and mixes with an equal-power stereo split
//!
//! Commands cross the boundary fire-and-forget; gain and pan glide on the
//! audio thread so retargeting never clicks.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod math;
pub mod mixer;
pub mod output;
pub mod scene;
pub mod spatial;
pub mod world;

pub use config::{AcousticsSettings, RoomtoneWorldDesc, SourceConfig, Waveform};
pub use engine::{EnginePort, RoomtoneEngine};
pub use error::{Result, RoomtoneError};
pub use events::RoomtoneEvent;
pub use math::{Pose2, Vec2};
pub use output::{NullOutput, OutputPort, VoiceDescriptor, VoiceHandle};
pub use scene::{Material, Wall};
pub use spatial::{compute_params, AudioParams, DirectivityPattern, DistanceModel};
pub use world::RoomtoneWorld;
