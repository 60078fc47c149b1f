//! Error types for Roomtone

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomtoneError {
    #[error("Audio device error: {0}")]
    AudioDevice(String),

    #[error("Audio format error: {0}")]
    AudioFormat(String),

    #[error("Output unavailable: {0}")]
    OutputUnavailable(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, RoomtoneError>;
