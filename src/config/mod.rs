//! Configuration types: world descriptor, acoustic settings and per-source
//! configuration.

mod settings;
mod source_config;
mod world_desc;

pub use settings::AcousticsSettings;
pub use source_config::{SourceConfig, Waveform};
pub use world_desc::RoomtoneWorldDesc;
